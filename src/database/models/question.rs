use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::core::models::question::{Options, Question, QuestionType};

/// A row of the `questions` table.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i32,
    pub question: String,
    pub type_: QuestionType,
    pub options: Json<Options>,
    pub answer: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            question: row.question,
            type_: row.type_,
            options: row.options.0,
            answer: row.answer.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
