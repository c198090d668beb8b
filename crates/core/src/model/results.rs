use serde::Serialize;
use thiserror::Error;

/// Minimum score out of 10 that counts as a pass (inclusive).
pub const PASSING_SCORE: f64 = 5.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultsError {
    #[error("total items ({total}) does not match outcome counts ({sum})")]
    CountMismatch { total: usize, sum: usize },

    #[error("cannot grade an empty question set")]
    NoItems,
}

//
// ─── PER-QUESTION OUTCOME ──────────────────────────────────────────────────────
//

/// How a single question ended up at grading time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    Skipped,
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Aggregate outcome of a finished session.
///
/// Always satisfies `correct + incorrect + skipped == total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionResults {
    correct: usize,
    incorrect: usize,
    skipped: usize,
}

impl SessionResults {
    /// Build results from counts, checking they cover exactly `total` items.
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::NoItems` when `total` is zero and
    /// `ResultsError::CountMismatch` when the counts do not add up.
    pub fn from_counts(
        total: usize,
        correct: usize,
        incorrect: usize,
        skipped: usize,
    ) -> Result<Self, ResultsError> {
        if total == 0 {
            return Err(ResultsError::NoItems);
        }
        let sum = correct
            .saturating_add(incorrect)
            .saturating_add(skipped);
        if sum != total {
            return Err(ResultsError::CountMismatch { total, sum });
        }
        Ok(Self {
            correct,
            incorrect,
            skipped,
        })
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.skipped
    }

    #[must_use]
    pub fn grade(&self) -> GradeSummary {
        GradeSummary::from_results(self)
    }
}

//
// ─── GRADE ─────────────────────────────────────────────────────────────────────
//

/// Score view of a finished session.
///
/// `score_out_of_10` is the unrounded ratio; round only for display via
/// [`GradeSummary::rounded_score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeSummary {
    pub score_out_of_10: f64,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
}

impl GradeSummary {
    #[must_use]
    pub fn from_results(results: &SessionResults) -> Self {
        Self {
            score_out_of_10: score_out_of_10(results.correct, results.total()),
            correct: results.correct,
            incorrect: results.incorrect,
            skipped: results.skipped,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.skipped
    }

    /// Score rounded half away from zero to one decimal place.
    #[must_use]
    pub fn rounded_score(&self) -> f64 {
        (self.score_out_of_10 * 10.0).round() / 10.0
    }

    /// Share of correct answers as a whole percentage.
    #[must_use]
    pub fn percent(&self) -> u8 {
        // score is within [0, 10], so the rounded percentage fits in a u8
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (self.score_out_of_10 * 10.0).round().clamp(0.0, 100.0) as u8;
        pct
    }

    /// Whether the session reached [`PASSING_SCORE`].
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.score_out_of_10 >= PASSING_SCORE
    }
}

/// `correct / total * 10`, with the division performed first so whole
/// fractions such as 2/2 land exactly on 10.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_out_of_10(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 10.0
}
