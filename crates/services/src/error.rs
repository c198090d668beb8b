//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{QuestionSetError, ResultsError};
use storage::StorageError;

/// Coarse classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// The question set was empty or malformed; no session exists.
    Load,
    /// An index passed to an operation was out of range.
    InvalidInput,
    /// The operation is not allowed in the current lifecycle phase.
    InvalidState,
}

/// Errors emitted by `SessionEngine`.
///
/// A failed operation never changes session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] QuestionSetError),

    #[error("question {index} is out of range for {len} questions")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {option} is out of range for question {question} with {len} options")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        len: usize,
    },

    #[error("session already finished")]
    Finished,

    #[error("session is not finished yet")]
    NotFinished,

    #[error("question {index} already has an answer")]
    AnswerLocked { index: usize },

    #[error(transparent)]
    Results(#[from] ResultsError),
}

impl SessionError {
    #[must_use]
    pub fn kind(&self) -> SessionErrorKind {
        match self {
            SessionError::Load(_) => SessionErrorKind::Load,
            SessionError::QuestionOutOfRange { .. } | SessionError::OptionOutOfRange { .. } => {
                SessionErrorKind::InvalidInput
            }
            SessionError::Finished
            | SessionError::NotFinished
            | SessionError::AnswerLocked { .. }
            | SessionError::Results(_) => SessionErrorKind::InvalidState,
        }
    }
}

/// Errors emitted by `ExamLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<QuestionSetError> for ExamServiceError {
    fn from(err: QuestionSetError) -> Self {
        Self::Session(SessionError::Load(err))
    }
}
