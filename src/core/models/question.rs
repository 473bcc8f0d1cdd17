use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(sqlx::Type)]
#[sqlx(type_name = "question_type")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    #[default]
    #[sqlx(rename = "single-choice")]
    SingleChoice,
    #[sqlx(rename = "multiple-choice")]
    MultipleChoice,
    #[sqlx(rename = "numeric")]
    Numeric,
    #[sqlx(rename = "text-match")]
    TextMatch,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single-choice",
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::Numeric => "numeric",
            QuestionType::TextMatch => "text-match",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-choice" => Ok(QuestionType::SingleChoice),
            "multiple-choice" => Ok(QuestionType::MultipleChoice),
            "numeric" => Ok(QuestionType::Numeric),
            "text-match" => Ok(QuestionType::TextMatch),
            other => Err(other.to_owned()),
        }
    }
}

/// Displayed content of a single choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(Number),
}

/// Choice key ("a".."e") to displayed content.
pub type Options = BTreeMap<String, OptionValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub question: String,
    #[serde(rename = "type")]
    pub type_: QuestionType,
    pub options: Options,
    pub answer: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A question as submitted by a client, before validation.
///
/// Every field is kept as raw JSON so that shape errors can be reported per
/// field instead of failing deserialization of the whole body. A JSON `null`
/// counts as an absent field, so in a patch it leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Draft {
    pub question: Option<Value>,
    #[serde(rename = "type")]
    pub type_: Option<Value>,
    pub options: Option<Value>,
    pub answer: Option<Value>,
}

impl Draft {
    /// Overlays the fields present in `patch` on top of `self`.
    pub fn merge(self, patch: Draft) -> Draft {
        Draft {
            question: patch.question.or(self.question),
            type_: patch.type_.or(self.type_),
            options: patch.options.or(self.options),
            answer: patch.answer.or(self.answer),
        }
    }
}

impl From<Question> for Draft {
    fn from(q: Question) -> Self {
        let options = q
            .options
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    OptionValue::Text(s) => Value::String(s),
                    OptionValue::Number(n) => Value::Number(n),
                };
                (k, v)
            })
            .collect();
        Draft {
            question: Some(Value::String(q.question)),
            type_: Some(Value::String(q.type_.as_str().to_owned())),
            options: Some(Value::Object(options)),
            answer: Some(Value::Array(q.answer.into_iter().map(Value::String).collect())),
        }
    }
}

/// A validated question, one variant per question type.
///
/// Only values of this type reach the store, so every persisted record
/// satisfies the option/answer rules of its type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    SingleChoice { question: String, options: Options, answer: Vec<String> },
    MultipleChoice { question: String, options: Options, answer: Vec<String> },
    Numeric { question: String, answer: String },
    TextMatch { question: String, answer: String },
}

impl Payload {
    pub fn question(&self) -> &str {
        match self {
            Payload::SingleChoice { question, .. }
            | Payload::MultipleChoice { question, .. }
            | Payload::Numeric { question, .. }
            | Payload::TextMatch { question, .. } => question,
        }
    }

    pub fn type_(&self) -> QuestionType {
        match self {
            Payload::SingleChoice { .. } => QuestionType::SingleChoice,
            Payload::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Payload::Numeric { .. } => QuestionType::Numeric,
            Payload::TextMatch { .. } => QuestionType::TextMatch,
        }
    }

    /// Splits the payload into the columns the store persists.
    pub fn into_columns(self) -> (String, QuestionType, Options, Vec<String>) {
        let type_ = self.type_();
        match self {
            Payload::SingleChoice { question, options, answer } | Payload::MultipleChoice { question, options, answer } => (question, type_, options, answer),
            Payload::Numeric { question, answer } | Payload::TextMatch { question, answer } => (question, type_, Options::new(), vec![answer]),
        }
    }
}
