use std::collections::BTreeMap;

/// Chosen option per question index.
///
/// Presence of a key is the only signal that a question was answered; a
/// skipped question simply has no entry. The sheet itself does not know the
/// question set, so range checks belong to whoever owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    choices: BTreeMap<usize, usize>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `option` for `question`, returning the previous choice if any.
    pub fn record(&mut self, question: usize, option: usize) -> Option<usize> {
        self.choices.insert(question, option)
    }

    #[must_use]
    pub fn is_answered(&self, question: usize) -> bool {
        self.choices.contains_key(&question)
    }

    #[must_use]
    pub fn choice(&self, question: usize) -> Option<usize> {
        self.choices.get(&question).copied()
    }

    /// Number of answered questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// `(question, option)` pairs in question order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.choices.iter().map(|(q, o)| (*q, *o))
    }
}

impl FromIterator<(usize, usize)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut sheet = Self::new();
        for (question, option) in iter {
            sheet.record(question, option);
        }
        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_record_wins() {
        let mut sheet = AnswerSheet::new();
        assert_eq!(sheet.record(0, 1), None);
        assert_eq!(sheet.record(0, 3), Some(1));
        assert_eq!(sheet.choice(0), Some(3));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn absent_question_is_unanswered() {
        let sheet: AnswerSheet = [(2, 0)].into_iter().collect();
        assert!(!sheet.is_answered(0));
        assert!(sheet.is_answered(2));
        assert_eq!(sheet.choice(1), None);
    }

    #[test]
    fn iterates_in_question_order() {
        let sheet: AnswerSheet = [(4, 1), (0, 2), (2, 0)].into_iter().collect();
        let pairs: Vec<_> = sheet.iter().collect();
        assert_eq!(pairs, vec![(0, 2), (2, 0), (4, 1)]);
    }
}
