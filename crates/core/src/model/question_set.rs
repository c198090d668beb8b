use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::question::{Question, QuestionDraft, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("question set has no items")]
    Empty,

    #[error("question {index} is malformed: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Unvalidated question set, the shape repositories hand back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSetDraft {
    #[serde(default)]
    pub title: String,
    pub items: Vec<QuestionDraft>,
}

impl QuestionSetDraft {
    pub fn new(title: impl Into<String>, items: Vec<QuestionDraft>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// Validate every item before building the set.
    ///
    /// Nothing is constructed unless all items pass, so a failure never leaves
    /// a partially loaded set behind.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` for a set without items and
    /// `QuestionSetError::InvalidQuestion` for the first malformed item.
    pub fn validate(self) -> Result<QuestionSet, QuestionSetError> {
        if self.items.is_empty() {
            return Err(QuestionSetError::Empty);
        }

        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| QuestionSetError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuestionSet {
            title: self.title.trim().to_owned(),
            items,
        })
    }
}

/// Immutable, validated, ordered collection of questions for one exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    title: String,
    items: Vec<Question>,
}

impl QuestionSet {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn items(&self) -> &[Question] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.items.get(index)
    }

    /// Number of questions. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn to_draft(&self) -> QuestionSetDraft {
        QuestionSetDraft {
            title: self.title.clone(),
            items: self.items.iter().map(Question::to_draft).collect(),
        }
    }

    /// Reorders the questions. Correct options travel with their question.
    pub fn reorder_with(&mut self, f: impl FnOnce(&mut [Question])) {
        f(&mut self.items);
    }
}
