//! Read models a front end renders from a `SessionEngine`.
//!
//! These are intentionally **not** UI widgets:
//! - no colors, markup or pre-formatted sentences
//! - option labels are the only display strings derived here
//!
//! Statuses come from the engine's `question_status` derivation, so front
//! ends never re-grade.

use serde::Serialize;

use exam_core::model::{
    AnswerOutcome, GradeSummary, QuestionStatus, SessionResults, option_label,
};

use super::engine::SessionEngine;
use crate::error::SessionError;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Mark put on an option once the session is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealMark {
    /// The correct option.
    Correct,
    /// The option the user chose, when it was wrong.
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub index: usize,
    pub label: String,
    pub text: String,
    pub selected: bool,
    pub reveal: Option<RevealMark>,
}

/// Per-question feedback, shown only after finishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    Correct {
        explanation: Option<String>,
    },
    Incorrect {
        correct_label: String,
        explanation: Option<String>,
    },
    Skipped {
        correct_label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    /// 1-based position for display.
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<OptionView>,
    /// No further selection is accepted for this question.
    pub locked: bool,
    pub status: QuestionStatus,
    pub feedback: Option<Feedback>,
}

impl QuestionView {
    /// View of the question the session currently points at.
    #[must_use]
    pub fn current(engine: &SessionEngine) -> Self {
        Self::build(engine, engine.current_index())
    }

    /// View of any question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionOutOfRange` for an unknown index.
    pub fn for_index(engine: &SessionEngine, index: usize) -> Result<Self, SessionError> {
        engine.question_status(index)?;
        Ok(Self::build(engine, index))
    }

    fn build(engine: &SessionEngine, index: usize) -> Self {
        let question = &engine.question_set().items()[index];
        let choice = engine.answers().choice(index);
        let finished = engine.is_finished();

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let selected = choice == Some(i);
                let reveal = if !finished {
                    None
                } else if question.is_correct(i) {
                    Some(RevealMark::Correct)
                } else if selected {
                    Some(RevealMark::Wrong)
                } else {
                    None
                };
                OptionView {
                    index: i,
                    label: option_label(i),
                    text: text.clone(),
                    selected,
                    reveal,
                }
            })
            .collect();

        let feedback = engine.outcome(index).map(|outcome| {
            let correct_label = option_label(question.correct_option());
            let explanation = question.explanation().map(ToOwned::to_owned);
            match outcome {
                AnswerOutcome::Correct => Feedback::Correct { explanation },
                AnswerOutcome::Incorrect => Feedback::Incorrect {
                    correct_label,
                    explanation,
                },
                AnswerOutcome::Skipped => Feedback::Skipped { correct_label },
            }
        });

        let locked = finished || (engine.settings().lock_answered() && choice.is_some());
        let status = engine.status_for(question, index);

        Self {
            index,
            number: index + 1,
            total: engine.len(),
            text: question.text().to_owned(),
            options,
            locked,
            status,
            feedback,
        }
    }
}

//
// ─── NAVIGATION ────────────────────────────────────────────────────────────────
//

/// Which navigation controls make sense right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Finishing is offered on the last question of an unfinished session.
    pub can_finish: bool,
}

impl NavigationView {
    #[must_use]
    pub fn from_engine(engine: &SessionEngine) -> Self {
        Self {
            can_go_previous: engine.current_index() > 0,
            can_go_next: !engine.is_last(),
            can_finish: engine.is_last() && !engine.is_finished(),
        }
    }
}

/// One entry of the question navigator strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigatorPill {
    pub index: usize,
    pub number: usize,
    pub is_current: bool,
    pub status: QuestionStatus,
    pub outcome: Option<AnswerOutcome>,
}

#[must_use]
pub fn navigator(engine: &SessionEngine) -> Vec<NavigatorPill> {
    engine
        .question_set()
        .items()
        .iter()
        .enumerate()
        .map(|(index, question)| NavigatorPill {
            index,
            number: index + 1,
            is_current: index == engine.current_index(),
            status: engine.status_for(question, index),
            outcome: engine.outcome(index),
        })
        .collect()
}

//
// ─── DASHBOARD ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub answered: usize,
    pub total: usize,
    pub results: Option<SessionResults>,
    /// Correct answers as a whole percentage, once finished.
    pub percent: Option<u8>,
}

impl DashboardView {
    #[must_use]
    pub fn from_engine(engine: &SessionEngine) -> Self {
        let results = engine.results().copied();
        Self {
            answered: engine.answers().len(),
            total: engine.len(),
            results,
            percent: results.map(|r| r.grade().percent()),
        }
    }
}

//
// ─── FINAL REPORT ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    pub number: usize,
    pub text: String,
    pub outcome: AnswerOutcome,
    /// Text of the chosen option; `None` when skipped.
    pub chosen: Option<String>,
    pub correct: String,
}

/// Everything shown once the session is finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalReport {
    pub title: String,
    pub grade: GradeSummary,
    /// Rounded to one decimal for display.
    pub score: f64,
    /// Celebration trigger: score out of 10 is at least the passing score.
    pub passed: bool,
    pub elapsed_secs: Option<i64>,
    pub items: Vec<ReviewItem>,
}

impl FinalReport {
    /// Build the report of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` before the session is finished.
    pub fn from_engine(engine: &SessionEngine) -> Result<Self, SessionError> {
        let grade = engine.grade()?;

        let items = engine
            .question_set()
            .items()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let chosen = engine
                    .answers()
                    .choice(index)
                    .and_then(|o| question.option(o))
                    .map(ToOwned::to_owned);
                ReviewItem {
                    number: index + 1,
                    text: question.text().to_owned(),
                    outcome: engine.outcome(index).unwrap_or(AnswerOutcome::Skipped),
                    chosen,
                    correct: question.correct_text().to_owned(),
                }
            })
            .collect();

        Ok(Self {
            title: engine.title().to_owned(),
            grade,
            score: grade.rounded_score(),
            passed: grade.is_passing(),
            elapsed_secs: engine
                .finished_at()
                .map(|end| (end - engine.started_at()).num_seconds()),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{QuestionDraft, QuestionSetDraft, SessionSettings};
    use exam_core::time::fixed_clock;

    fn engine() -> SessionEngine {
        let items = vec![
            QuestionDraft::new("One?", ["a", "b", "c"], 0).with_explanation("a it is"),
            QuestionDraft::new("Two?", ["a", "b", "c"], 1),
            QuestionDraft::new("Three?", ["a", "b"], 1),
        ];
        SessionEngine::load(QuestionSetDraft::new("Views", items))
            .unwrap()
            .with_clock(fixed_clock())
    }

    #[test]
    fn unfinished_question_has_selection_but_no_reveal() {
        let mut engine = engine();
        engine.select_option(0, 2).unwrap();
        let view = QuestionView::current(&engine);

        assert_eq!(view.number, 1);
        assert_eq!(view.total, 3);
        assert_eq!(view.options[2].label, "C");
        assert!(view.options[2].selected);
        assert!(view.options.iter().all(|o| o.reveal.is_none()));
        assert!(view.feedback.is_none());
        assert!(!view.locked);
        assert_eq!(view.status, QuestionStatus::Answered);
    }

    fn assert_statuses_match_engine(engine: &SessionEngine) {
        let pills = navigator(engine);
        for (index, pill) in pills.iter().enumerate() {
            let expected = engine.question_status(index).unwrap();
            assert_eq!(pill.status, expected);
            assert_eq!(QuestionView::for_index(engine, index).unwrap().status, expected);
        }
    }

    #[test]
    fn views_report_engine_statuses_before_and_after_finish() {
        let mut engine = engine();
        engine.select_option(0, 0).unwrap();
        engine.select_option(1, 0).unwrap();
        assert_statuses_match_engine(&engine);

        engine.finish().unwrap();
        assert_statuses_match_engine(&engine);
        assert_eq!(navigator(&engine)[0].status, QuestionStatus::CorrectReveal);
        assert_eq!(navigator(&engine)[1].status, QuestionStatus::IncorrectReveal);
        assert_eq!(navigator(&engine)[2].status, QuestionStatus::Unanswered);
    }

    #[test]
    fn lock_policy_marks_answered_questions_locked() {
        let mut engine =
            engine().with_settings(SessionSettings::new().with_lock_answered(true));
        assert!(!QuestionView::current(&engine).locked);
        engine.select_current(0).unwrap();
        assert!(QuestionView::current(&engine).locked);
    }

    #[test]
    fn finished_views_reveal_and_explain() {
        let mut engine = engine();
        engine.select_option(0, 0).unwrap();
        engine.select_option(1, 2).unwrap();
        engine.finish().unwrap();

        let first = QuestionView::for_index(&engine, 0).unwrap();
        assert_eq!(first.options[0].reveal, Some(RevealMark::Correct));
        assert_eq!(
            first.feedback,
            Some(Feedback::Correct {
                explanation: Some("a it is".into())
            })
        );

        let second = QuestionView::for_index(&engine, 1).unwrap();
        assert_eq!(second.options[1].reveal, Some(RevealMark::Correct));
        assert_eq!(second.options[2].reveal, Some(RevealMark::Wrong));
        assert_eq!(second.options[0].reveal, None);
        assert_eq!(
            second.feedback,
            Some(Feedback::Incorrect {
                correct_label: "B".into(),
                explanation: None
            })
        );

        let third = QuestionView::for_index(&engine, 2).unwrap();
        assert!(third.locked);
        assert_eq!(third.status, QuestionStatus::Unanswered);
        assert_eq!(
            third.feedback,
            Some(Feedback::Skipped {
                correct_label: "B".into()
            })
        );

        assert!(QuestionView::for_index(&engine, 3).is_err());
    }

    #[test]
    fn navigation_offers_finish_only_on_last_unfinished_question() {
        let mut engine = engine();
        let nav = NavigationView::from_engine(&engine);
        assert!(!nav.can_go_previous && nav.can_go_next && !nav.can_finish);

        engine.go_to(2).unwrap();
        let nav = NavigationView::from_engine(&engine);
        assert!(nav.can_go_previous && !nav.can_go_next && nav.can_finish);

        engine.finish().unwrap();
        assert!(!NavigationView::from_engine(&engine).can_finish);
    }

    #[test]
    fn navigator_tracks_current_and_outcomes() {
        let mut engine = engine();
        engine.select_option(1, 1).unwrap();
        engine.go_to(1).unwrap();

        let pills = navigator(&engine);
        assert_eq!(pills.len(), 3);
        assert!(pills[1].is_current);
        assert_eq!(pills[1].status, QuestionStatus::Answered);
        assert_eq!(pills[0].outcome, None);

        engine.finish().unwrap();
        let pills = navigator(&engine);
        assert_eq!(pills[0].outcome, Some(AnswerOutcome::Skipped));
        assert_eq!(pills[1].status, QuestionStatus::CorrectReveal);
    }

    #[test]
    fn dashboard_and_report_agree_with_results() {
        let mut engine = engine();
        engine.select_option(0, 0).unwrap();
        engine.select_option(1, 0).unwrap();

        let dash = DashboardView::from_engine(&engine);
        assert_eq!((dash.answered, dash.total), (2, 3));
        assert_eq!(dash.results, None);
        assert!(FinalReport::from_engine(&engine).is_err());

        engine.finish().unwrap();
        let dash = DashboardView::from_engine(&engine);
        assert_eq!(dash.percent, Some(33));

        let report = FinalReport::from_engine(&engine).unwrap();
        assert_eq!(report.title, "Views");
        assert!((report.score - 3.3).abs() < 1e-9);
        assert!(!report.passed);
        assert_eq!(report.elapsed_secs, Some(0));
        assert_eq!(report.items[1].chosen.as_deref(), Some("a"));
        assert_eq!(report.items[1].correct, "b");
        assert_eq!(report.items[2].outcome, AnswerOutcome::Skipped);
        assert_eq!(report.items[2].chosen, None);
    }
}
