use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Width numeric exam keys are left-padded to (`"3"` becomes `"03"`).
pub const EXAM_KEY_WIDTH: usize = 2;

const MAX_EXAM_KEY_LEN: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamKeyError {
    #[error("exam key cannot be empty")]
    Empty,

    #[error("exam key is too long: {len} characters")]
    TooLong { len: usize },

    #[error("exam key contains an invalid character: {ch:?}")]
    InvalidCharacter { ch: char },
}

/// External identifier of a question set.
///
/// Keys are normalized on parse: surrounding whitespace is dropped and purely
/// numeric keys are left-padded with zeros to [`EXAM_KEY_WIDTH`]. Only ASCII
/// alphanumerics, `-` and `_` are accepted since back ends embed the key in
/// file names.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExamKey(String);

impl ExamKey {
    /// Parses and normalizes a raw key.
    ///
    /// # Errors
    ///
    /// Returns `ExamKeyError` if the key is blank, too long or contains a
    /// character outside `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, ExamKeyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExamKeyError::Empty);
        }
        if trimmed.len() > MAX_EXAM_KEY_LEN {
            return Err(ExamKeyError::TooLong { len: trimmed.len() });
        }
        if let Some(ch) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ExamKeyError::InvalidCharacter { ch });
        }

        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(format!("{trimmed:0>EXAM_KEY_WIDTH$}")))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ExamKey {
    fn default() -> Self {
        Self("01".to_owned())
    }
}

impl fmt::Debug for ExamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExamKey({})", self.0)
    }
}

impl fmt::Display for ExamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExamKey {
    type Err = ExamKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExamKey {
    type Error = ExamKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExamKey> for String {
    fn from(key: ExamKey) -> Self {
        key.0
    }
}

/// Identifier of a single in-memory exam session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a fresh random id.
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_keys_are_padded() {
        assert_eq!(ExamKey::parse("3").unwrap().as_str(), "03");
        assert_eq!(ExamKey::parse(" 12 ").unwrap().as_str(), "12");
        assert_eq!(ExamKey::parse("123").unwrap().as_str(), "123");
    }

    #[test]
    fn named_keys_are_kept() {
        assert_eq!(ExamKey::parse("final-b").unwrap().as_str(), "final-b");
    }

    #[test]
    fn default_key_is_first_exam() {
        assert_eq!(ExamKey::default(), ExamKey::parse("1").unwrap());
    }

    #[test]
    fn rejects_path_like_keys() {
        assert_eq!(
            ExamKey::parse("../etc").unwrap_err(),
            ExamKeyError::InvalidCharacter { ch: '.' }
        );
        assert_eq!(ExamKey::parse("   ").unwrap_err(), ExamKeyError::Empty);
    }

    #[test]
    fn serde_normalizes_through_parse() {
        let key: ExamKey = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(key.to_string(), "07");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"07\"");
        assert!(serde_json::from_str::<ExamKey>("\"a/b\"").is_err());
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new_random(), SessionId::new_random());
    }
}
