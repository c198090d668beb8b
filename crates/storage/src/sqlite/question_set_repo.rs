use chrono::Utc;
use exam_core::model::{ExamKey, QuestionSet, QuestionSetDraft};
use sqlx::Row;
use tracing::debug;

use super::SqliteRepository;
use super::mapping::{exam_key_from_str, map_question_row, options_to_json, ser, usize_to_i64};
use crate::repository::{QuestionSetRepository, StorageError};

#[async_trait::async_trait]
impl QuestionSetRepository for SqliteRepository {
    async fn get_question_set(&self, key: &ExamKey) -> Result<QuestionSetDraft, StorageError> {
        let title: Option<String> =
            sqlx::query_scalar("SELECT title FROM question_sets WHERE exam_key = ?1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;
        let Some(title) = title else {
            return Err(StorageError::NotFound(key.clone()));
        };

        let rows = sqlx::query(
            r"
            SELECT text, options, correct_option, explanation
            FROM questions
            WHERE exam_key = ?1
            ORDER BY position ASC
            ",
        )
        .bind(key.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(map_question_row(row)?);
        }
        debug!(exam = %key, questions = items.len(), "loaded question set from sqlite");

        Ok(QuestionSetDraft { title, items })
    }

    async fn list_exam_keys(&self) -> Result<Vec<ExamKey>, StorageError> {
        let rows = sqlx::query("SELECT exam_key FROM question_sets ORDER BY exam_key ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: String = row.try_get("exam_key").map_err(ser)?;
            keys.push(exam_key_from_str(&raw)?);
        }
        Ok(keys)
    }

    async fn upsert_question_set(
        &self,
        key: &ExamKey,
        set: &QuestionSet,
    ) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO question_sets (exam_key, title, imported_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(exam_key) DO UPDATE SET
                title = excluded.title,
                imported_at = excluded.imported_at
            ",
        )
        .bind(key.as_str())
        .bind(set.title())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query("DELETE FROM questions WHERE exam_key = ?1")
            .bind(key.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        for (position, question) in set.items().iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO questions (exam_key, position, text, options, correct_option, explanation)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(key.as_str())
            .bind(usize_to_i64("position", position)?)
            .bind(question.text())
            .bind(options_to_json(question)?)
            .bind(usize_to_i64("correct_option", question.correct_option())?)
            .bind(question.explanation())
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        debug!(exam = %key, questions = set.len(), "stored question set in sqlite");
        Ok(())
    }
}
