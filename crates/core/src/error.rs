use thiserror::Error;

use crate::model::{ExamKeyError, QuestionError, QuestionSetError, ResultsError};

/// Aggregate of every validation error the domain layer can raise.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    ExamKey(#[from] ExamKeyError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuestionSet(#[from] QuestionSetError),
    #[error(transparent)]
    Results(#[from] ResultsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExamKey;

    #[test]
    fn model_errors_convert_and_keep_their_message() {
        let err: Error = ExamKey::parse("a/b").unwrap_err().into();
        assert!(matches!(err, Error::ExamKey(_)));
        assert_eq!(err.to_string(), ExamKey::parse("a/b").unwrap_err().to_string());
    }
}
