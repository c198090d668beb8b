use async_trait::async_trait;
use exam_core::model::{ExamKey, QuestionSet, QuestionSetDraft};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonDirectoryRepository;

/// Errors surfaced by question-set sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("exam {0} not found")]
    NotFound(ExamKey),

    #[error("could not parse question set: {0}")]
    Parse(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Source of question sets, keyed by exam.
///
/// Repositories return the raw draft; validation is the session's job so a
/// malformed set is reported the same way whatever the back end.
#[async_trait]
pub trait QuestionSetRepository: Send + Sync {
    /// Fetch the question set stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no set exists for the key and
    /// `StorageError::Parse` if the stored set cannot be decoded.
    async fn get_question_set(&self, key: &ExamKey) -> Result<QuestionSetDraft, StorageError>;

    /// List every exam key this source can serve, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be enumerated.
    async fn list_exam_keys(&self) -> Result<Vec<ExamKey>, StorageError>;

    /// Store or replace the set under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be written.
    async fn upsert_question_set(&self, key: &ExamKey, set: &QuestionSet)
    -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sets: Arc<Mutex<BTreeMap<ExamKey, QuestionSetDraft>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a draft as-is, without validation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_draft(&self, key: ExamKey, draft: QuestionSetDraft) -> Result<(), StorageError> {
        let mut guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, draft);
        Ok(())
    }
}

#[async_trait]
impl QuestionSetRepository for InMemoryRepository {
    async fn get_question_set(&self, key: &ExamKey) -> Result<QuestionSetDraft, StorageError> {
        let guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.clone()))
    }

    async fn list_exam_keys(&self) -> Result<Vec<ExamKey>, StorageError> {
        let guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.keys().cloned().collect())
    }

    async fn upsert_question_set(
        &self,
        key: &ExamKey,
        set: &QuestionSet,
    ) -> Result<(), StorageError> {
        self.insert_draft(key.clone(), set.to_draft())
    }
}

/// Question-set source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub question_sets: Arc<dyn QuestionSetRepository>,
}

impl Storage {
    /// Serve `db_tema_<key>.json` files from `root`.
    #[must_use]
    pub fn json_dir(root: impl Into<PathBuf>) -> Self {
        let repo: Arc<dyn QuestionSetRepository> = Arc::new(JsonDirectoryRepository::new(root));
        Self {
            question_sets: repo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::QuestionDraft;

    fn draft(title: &str) -> QuestionSetDraft {
        QuestionSetDraft::new(title, vec![QuestionDraft::new("Q", ["a", "b"], 0)])
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let repo = InMemoryRepository::new();
        let key = ExamKey::parse("4").unwrap();
        let err = repo.get_question_set(&key).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(k) if k == key));
    }

    #[tokio::test]
    async fn upsert_replaces_and_lists_sorted() {
        let repo = InMemoryRepository::new();
        let second = ExamKey::parse("2").unwrap();
        let first = ExamKey::parse("1").unwrap();

        let set = draft("Old").validate().unwrap();
        repo.upsert_question_set(&second, &set).await.unwrap();
        let set = draft("New").validate().unwrap();
        repo.upsert_question_set(&second, &set).await.unwrap();
        repo.insert_draft(first.clone(), draft("First")).unwrap();

        assert_eq!(repo.list_exam_keys().await.unwrap(), vec![first, second.clone()]);
        assert_eq!(repo.get_question_set(&second).await.unwrap().title, "New");
    }

    #[tokio::test]
    async fn malformed_drafts_are_served_unvalidated() {
        let repo = InMemoryRepository::new();
        let key = ExamKey::default();
        repo.insert_draft(key.clone(), QuestionSetDraft::new("Empty", Vec::new()))
            .unwrap();
        let fetched = repo.get_question_set(&key).await.unwrap();
        assert!(fetched.items.is_empty());
    }
}
