use exam_core::model::{ExamKey, Question, QuestionDraft};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn usize_from_i64(field: &'static str, v: i64) -> Result<usize, StorageError> {
    usize::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn usize_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn exam_key_from_str(raw: &str) -> Result<ExamKey, StorageError> {
    ExamKey::parse(raw).map_err(ser)
}

/// Options are kept as a JSON array in a single column.
pub(crate) fn options_to_json(question: &Question) -> Result<String, StorageError> {
    serde_json::to_string(question.options()).map_err(ser)
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuestionDraft, StorageError> {
    let options_json: String = row.try_get("options").map_err(ser)?;
    let options: Vec<String> = serde_json::from_str(&options_json)
        .map_err(|e| StorageError::Parse(format!("options column: {e}")))?;

    let correct_option = usize_from_i64(
        "correct_option",
        row.try_get::<i64, _>("correct_option").map_err(ser)?,
    )?;

    Ok(QuestionDraft {
        text: row.try_get("text").map_err(ser)?,
        options,
        correct_option,
        explanation: row.try_get("explanation").map_err(ser)?,
    })
}
