use serde::Serialize;

use crate::model::AnswerOutcome;

/// Per-question display state derived from answers and, once finished, grading.
///
/// Before a session is finished only `Unanswered` and `Answered` occur. After
/// it is finished answered questions become `CorrectReveal` or
/// `IncorrectReveal`, while `Unanswered` reads as "skipped, correct answer
/// revealed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Unanswered,
    Answered,
    CorrectReveal,
    IncorrectReveal,
}

impl QuestionStatus {
    /// Status of a question once grading has happened.
    #[must_use]
    pub fn revealed(outcome: AnswerOutcome) -> Self {
        match outcome {
            AnswerOutcome::Correct => Self::CorrectReveal,
            AnswerOutcome::Incorrect => Self::IncorrectReveal,
            AnswerOutcome::Skipped => Self::Unanswered,
        }
    }

    #[must_use]
    pub fn has_answer(self) -> bool {
        !matches!(self, Self::Unanswered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_questions_reveal_as_unanswered() {
        assert_eq!(
            QuestionStatus::revealed(AnswerOutcome::Correct),
            QuestionStatus::CorrectReveal
        );
        assert_eq!(
            QuestionStatus::revealed(AnswerOutcome::Incorrect),
            QuestionStatus::IncorrectReveal
        );
        assert!(!QuestionStatus::revealed(AnswerOutcome::Skipped).has_answer());
        assert!(QuestionStatus::Answered.has_answer());
    }
}
