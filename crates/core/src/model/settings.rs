/// Behaviour knobs for a single exam session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSettings {
    lock_answered: bool,
    shuffle_questions: bool,
}

impl SessionSettings {
    /// Overwrite allowed, questions in file order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, a question keeps its first recorded answer.
    #[must_use]
    pub fn with_lock_answered(mut self, lock: bool) -> Self {
        self.lock_answered = lock;
        self
    }

    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn lock_answered(&self) -> bool {
        self.lock_answered
    }

    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }
}
