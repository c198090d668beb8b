use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{info, warn};

use exam_core::model::{ExamKey, QuestionSet, QuestionSetDraft, SessionSettings};
use storage::repository::QuestionSetRepository;

use super::engine::SessionEngine;
use crate::Clock;
use crate::error::ExamServiceError;

/// Loads question sets from storage and starts sessions on them.
#[derive(Clone)]
pub struct ExamLoopService {
    clock: Clock,
    question_sets: Arc<dyn QuestionSetRepository>,
    settings: SessionSettings,
}

impl ExamLoopService {
    #[must_use]
    pub fn new(clock: Clock, question_sets: Arc<dyn QuestionSetRepository>) -> Self {
        Self {
            clock,
            question_sets,
            settings: SessionSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Start a new session on the exam stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` if the set cannot be read and
    /// `ExamServiceError::Session` if it is empty or malformed.
    pub async fn start_exam(&self, key: &ExamKey) -> Result<SessionEngine, ExamServiceError> {
        let mut set = self.check(key).await?;
        if self.settings.shuffle_questions() {
            set.reorder_with(|items| items.shuffle(&mut rand::rng()));
        }

        let engine = SessionEngine::new(set)
            .with_settings(self.settings)
            .with_clock(self.clock);
        info!(
            session = %engine.session_id(),
            exam = %key,
            questions = engine.len(),
            shuffled = self.settings.shuffle_questions(),
            "exam started"
        );
        Ok(engine)
    }

    /// Keys of every stored exam, sorted.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` on storage failures.
    pub async fn available_exams(&self) -> Result<Vec<ExamKey>, ExamServiceError> {
        Ok(self.question_sets.list_exam_keys().await?)
    }

    /// Read and validate the exam stored under `key` without starting a session.
    ///
    /// # Errors
    ///
    /// Same as [`start_exam`](Self::start_exam).
    pub async fn check(&self, key: &ExamKey) -> Result<QuestionSet, ExamServiceError> {
        let draft = self.question_sets.get_question_set(key).await?;
        draft.validate().map_err(|err| {
            warn!(exam = %key, error = %err, "stored question set is invalid");
            ExamServiceError::from(err)
        })
    }

    /// Validate `draft` and store it under `key`, replacing any previous set.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Session` for an invalid draft, in which case
    /// nothing is written, and `ExamServiceError::Storage` on write failures.
    pub async fn import(
        &self,
        key: &ExamKey,
        draft: QuestionSetDraft,
    ) -> Result<QuestionSet, ExamServiceError> {
        let set = draft.validate()?;
        self.question_sets.upsert_question_set(key, &set).await?;
        info!(exam = %key, questions = set.len(), "question set imported");
        Ok(set)
    }
}
