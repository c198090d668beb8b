//! Question sets stored as `db_tema_<key>.json` files in one directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use exam_core::model::{ExamKey, QuestionSet, QuestionSetDraft};
use tracing::debug;

use crate::repository::{QuestionSetRepository, StorageError};

const FILE_PREFIX: &str = "db_tema_";
const FILE_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct JsonDirectoryRepository {
    root: PathBuf,
}

impl JsonDirectoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &ExamKey) -> PathBuf {
        self.root
            .join(format!("{FILE_PREFIX}{key}.{FILE_EXTENSION}"))
    }
}

/// Key encoded in a file name, if the name is a canonical exam file.
fn key_from_file_name(name: &str) -> Option<ExamKey> {
    let stem = name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_EXTENSION)?
        .strip_suffix('.')?;
    let key = ExamKey::parse(stem).ok()?;
    // db_tema_3.json would normalize to 03 and then never be found again
    (key.as_str() == stem).then_some(key)
}

#[async_trait]
impl QuestionSetRepository for JsonDirectoryRepository {
    async fn get_question_set(&self, key: &ExamKey) -> Result<QuestionSetDraft, StorageError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), bytes = bytes.len(), "read question set file");

        serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Parse(format!("{}: {e}", path.display())))
    }

    async fn list_exam_keys(&self) -> Result<Vec<ExamKey>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(key) = entry.file_name().to_str().and_then(key_from_file_name) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn upsert_question_set(
        &self,
        key: &ExamKey,
        set: &QuestionSet,
    ) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(&set.to_draft())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), "wrote question set file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn file_names_map_to_keys() {
        assert_eq!(
            key_from_file_name("db_tema_07.json"),
            Some(ExamKey::parse("7").unwrap())
        );
        assert_eq!(
            key_from_file_name("db_tema_final.json").map(String::from),
            Some("final".to_owned())
        );
        assert_eq!(key_from_file_name("db_tema_7.json"), None);
        assert_eq!(key_from_file_name("db_tema_07.yaml"), None);
        assert_eq!(key_from_file_name("notes.json"), None);
        assert_eq!(key_from_file_name("db_tema_.json"), None);
    }

    #[test]
    fn path_uses_normalized_key() {
        let repo = JsonDirectoryRepository::new("data");
        let path = repo.path_for(&ExamKey::parse("2").unwrap());
        assert_eq!(path, Path::new("data").join("db_tema_02.json"));
    }
}
