use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info, warn};

use exam_core::Clock;
use exam_core::grading;
use exam_core::model::{
    AnswerOutcome, AnswerSheet, GradeSummary, Question, QuestionSet, QuestionSetDraft,
    QuestionStatus, SessionId, SessionResults, SessionSettings,
};

use super::progress::ExamProgress;
use crate::error::SessionError;

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one attempt at a question set.
///
/// Lifecycle: answering and free navigation, then a single explicit
/// [`finish`](Self::finish), then read-only review. Navigation stays open after
/// finishing; answers do not. Every failed call leaves the state untouched.
pub struct SessionEngine {
    id: SessionId,
    question_set: QuestionSet,
    settings: SessionSettings,
    clock: Clock,
    current: usize,
    answers: AnswerSheet,
    results: Option<SessionResults>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl SessionEngine {
    /// Validate a raw question set and start a session on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Load` if the set has no items or any item is
    /// malformed. No session is created in that case.
    pub fn load(draft: QuestionSetDraft) -> Result<Self, SessionError> {
        let set = draft.validate()?;
        Ok(Self::new(set))
    }

    /// Start a session on an already validated set.
    #[must_use]
    pub fn new(question_set: QuestionSet) -> Self {
        let clock = Clock::default();
        Self {
            id: SessionId::new_random(),
            question_set,
            settings: SessionSettings::default(),
            clock,
            current: 0,
            answers: AnswerSheet::new(),
            results: None,
            started_at: clock.now(),
            finished_at: None,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Use `clock` for timestamps; `started_at` is re-read from it.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.started_at = clock.now();
        self
    }

    // ─── read accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn question_set(&self) -> &QuestionSet {
        &self.question_set
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.question_set.title()
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Number of questions in the session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.question_set.len()
    }

    /// Always `false`: a session cannot be built on an empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.question_set.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.question_set.items()[self.current]
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.question_set.get(index)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Whether a choice is recorded for `index`.
    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.is_answered(index)
    }

    #[must_use]
    pub fn results(&self) -> Option<&SessionResults> {
        self.results.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.results.is_some()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.len()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn progress(&self) -> ExamProgress {
        let answered = self.answers.len();
        ExamProgress {
            total: self.len(),
            answered,
            unanswered: self.len().saturating_sub(answered),
            is_finished: self.is_finished(),
        }
    }

    // ─── answering ────────────────────────────────────────────────────────────

    /// Record `option` as the answer to `question`, replacing any earlier
    /// choice. Returns the replaced choice.
    ///
    /// # Errors
    ///
    /// - `SessionError::Finished` once the session is finished.
    /// - `SessionError::QuestionOutOfRange` / `OptionOutOfRange` for bad indices.
    /// - `SessionError::AnswerLocked` if answers lock on first choice and the
    ///   question already has one.
    pub fn select_option(
        &mut self,
        question: usize,
        option: usize,
    ) -> Result<Option<usize>, SessionError> {
        if let Err(err) = self.check_selection(question, option) {
            warn!(session = %self.id, question, option, error = %err, "selection rejected");
            return Err(err);
        }

        let previous = self.answers.record(question, option);
        debug!(session = %self.id, question, option, ?previous, "answer recorded");
        Ok(previous)
    }

    /// [`select_option`](Self::select_option) on the current question.
    ///
    /// # Errors
    ///
    /// Same as `select_option`.
    pub fn select_current(&mut self, option: usize) -> Result<Option<usize>, SessionError> {
        self.select_option(self.current, option)
    }

    // ─── navigation ───────────────────────────────────────────────────────────

    /// Jump to any question, answered or not. Allowed after finishing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionOutOfRange` if `index` is not a question.
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.checked_question(index)?;
        self.current = index;
        debug!(session = %self.id, index, "moved to question");
        Ok(())
    }

    /// Move forward one question. Returns `false` at the last question.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one question. Returns `false` at the first question.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    // ─── grading ──────────────────────────────────────────────────────────────

    /// Grade every question and lock the answers.
    ///
    /// Calling it again returns the stored results without regrading.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Results` only if grading produced inconsistent
    /// counts, which a validated set rules out.
    pub fn finish(&mut self) -> Result<SessionResults, SessionError> {
        if let Some(results) = self.results {
            return Ok(results);
        }

        let results = grading::grade(&self.question_set, &self.answers)?;
        let finished_at = self.clock.now();
        self.results = Some(results);
        self.finished_at = Some(finished_at);

        info!(
            session = %self.id,
            correct = results.correct(),
            incorrect = results.incorrect(),
            skipped = results.skipped(),
            "session finished"
        );
        Ok(results)
    }

    /// Score summary of the finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` before [`finish`](Self::finish).
    pub fn grade(&self) -> Result<GradeSummary, SessionError> {
        self.results
            .as_ref()
            .map(SessionResults::grade)
            .ok_or(SessionError::NotFinished)
    }

    /// Outcome of one question, available once the session is finished.
    #[must_use]
    pub fn outcome(&self, index: usize) -> Option<AnswerOutcome> {
        if !self.is_finished() {
            return None;
        }
        self.question_set
            .get(index)
            .map(|q| grading::outcome(q, self.answers.choice(index)))
    }

    /// Display state of a question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionOutOfRange` if `index` is not a question.
    pub fn question_status(&self, index: usize) -> Result<QuestionStatus, SessionError> {
        let question = self.checked_question(index)?;
        Ok(self.status_for(question, index))
    }

    /// Status of `question`, which must be the item at `index`. Shared with
    /// the views so reveal state has a single derivation.
    pub(crate) fn status_for(&self, question: &Question, index: usize) -> QuestionStatus {
        let choice = self.answers.choice(index);
        if self.is_finished() {
            return QuestionStatus::revealed(grading::outcome(question, choice));
        }
        if choice.is_some() {
            QuestionStatus::Answered
        } else {
            QuestionStatus::Unanswered
        }
    }

    fn check_selection(&self, question: usize, option: usize) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        let q = self.checked_question(question)?;
        if option >= q.option_count() {
            return Err(SessionError::OptionOutOfRange {
                question,
                option,
                len: q.option_count(),
            });
        }
        if self.settings.lock_answered() && self.answers.is_answered(question) {
            return Err(SessionError::AnswerLocked { index: question });
        }
        Ok(())
    }

    fn checked_question(&self, index: usize) -> Result<&Question, SessionError> {
        self.question_set
            .get(index)
            .ok_or(SessionError::QuestionOutOfRange {
                index,
                len: self.len(),
            })
    }
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("id", &self.id)
            .field("items_len", &self.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("results", &self.results)
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
