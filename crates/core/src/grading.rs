//! Scoring of a finished exam.
//!
//! Grading is a pure function of the question set and the answer sheet. It is
//! run once, in full, when a session finishes; nothing is scored
//! incrementally while answers are still changing.

use crate::model::{AnswerOutcome, AnswerSheet, Question, QuestionSet, ResultsError, SessionResults};

/// Classify one question given the option chosen for it, if any.
///
/// # Examples
///
/// ```
/// # use exam_core::grading::outcome;
/// # use exam_core::model::{AnswerOutcome, QuestionDraft};
/// let q = QuestionDraft::new("2 + 2?", ["3", "4"], 1).validate().unwrap();
/// assert_eq!(outcome(&q, Some(1)), AnswerOutcome::Correct);
/// assert_eq!(outcome(&q, Some(0)), AnswerOutcome::Incorrect);
/// assert_eq!(outcome(&q, None), AnswerOutcome::Skipped);
/// ```
#[must_use]
pub fn outcome(question: &Question, choice: Option<usize>) -> AnswerOutcome {
    match choice {
        None => AnswerOutcome::Skipped,
        Some(option) if question.is_correct(option) => AnswerOutcome::Correct,
        Some(_) => AnswerOutcome::Incorrect,
    }
}

/// Outcome of every question, in set order.
#[must_use]
pub fn outcomes(set: &QuestionSet, answers: &AnswerSheet) -> Vec<AnswerOutcome> {
    set.items()
        .iter()
        .enumerate()
        .map(|(index, question)| outcome(question, answers.choice(index)))
        .collect()
}

/// Tally the outcomes of the whole set.
///
/// Answers recorded for indices outside the set are ignored.
///
/// # Errors
///
/// Returns `ResultsError` only if the tally does not cover the set, which a
/// validated `QuestionSet` cannot produce.
pub fn grade(set: &QuestionSet, answers: &AnswerSheet) -> Result<SessionResults, ResultsError> {
    let mut correct = 0_usize;
    let mut incorrect = 0_usize;
    let mut skipped = 0_usize;

    for outcome in outcomes(set, answers) {
        match outcome {
            AnswerOutcome::Correct => correct += 1,
            AnswerOutcome::Incorrect => incorrect += 1,
            AnswerOutcome::Skipped => skipped += 1,
        }
    }

    SessionResults::from_counts(set.len(), correct, incorrect, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionSetDraft};

    fn set_with_correct(correct: &[usize]) -> QuestionSet {
        let items = correct
            .iter()
            .enumerate()
            .map(|(i, c)| QuestionDraft::new(format!("Q{i}"), ["a", "b", "c"], *c))
            .collect();
        QuestionSetDraft::new("Test", items).validate().unwrap()
    }

    #[test]
    fn mixed_answers_are_tallied() {
        let set = set_with_correct(&[0, 1, 0]);
        let answers: AnswerSheet = [(0, 0), (1, 2), (2, 0)].into_iter().collect();

        let results = grade(&set, &answers).unwrap();
        assert_eq!(results.correct(), 2);
        assert_eq!(results.incorrect(), 1);
        assert_eq!(results.skipped(), 0);
    }

    #[test]
    fn missing_answers_are_skipped() {
        let set = set_with_correct(&[0, 0, 0, 0]);
        let results = grade(&set, &AnswerSheet::new()).unwrap();
        assert_eq!(results.skipped(), 4);
        assert_eq!(results.total(), 4);
    }

    #[test]
    fn stray_indices_do_not_count() {
        let set = set_with_correct(&[1]);
        let answers: AnswerSheet = [(0, 1), (9, 1)].into_iter().collect();
        let results = grade(&set, &answers).unwrap();
        assert_eq!(results.correct(), 1);
        assert_eq!(results.total(), 1);
    }

    #[test]
    fn outcomes_follow_set_order() {
        let set = set_with_correct(&[2, 2]);
        let answers: AnswerSheet = [(1, 2)].into_iter().collect();
        assert_eq!(
            outcomes(&set, &answers),
            vec![AnswerOutcome::Skipped, AnswerOutcome::Correct]
        );
    }
}
