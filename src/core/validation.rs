//! Field rules for submitted questions.
//!
//! A [`Draft`] becomes a [`Payload`] only if its `options` and `answer` have the
//! shape its `type` requires. Rules run in a fixed order and the first failure is
//! reported.

use serde_json::Value;
use thiserror::Error as ThisError;

use crate::core::models::question::{Draft, OptionValue, Options, Payload, QuestionType};

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("question text is required")]
    MissingQuestionText,

    #[error("answer must be a non-empty list of option keys or values")]
    InvalidAnswerFormat,

    #[error("{0} questions require options as a non-empty mapping of keys to text or numbers")]
    MissingOptions(QuestionType),

    #[error("answer key '{0}' is not one of the options")]
    AnswerKeyNotInOptions(String),

    #[error("{0} questions take exactly one answer, got {1}")]
    WrongAnswerCardinality(QuestionType, usize),

    #[error("answer '{0}' is not a number")]
    NonNumericAnswer(String),

    #[error("unsupported question type '{0}'")]
    UnsupportedQuestionType(String),
}

impl ValidationError {
    /// Name of the request field the error is about.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingQuestionText => "question",
            ValidationError::MissingOptions(_) => "options",
            ValidationError::UnsupportedQuestionType(_) => "type",
            ValidationError::InvalidAnswerFormat
            | ValidationError::AnswerKeyNotInOptions(_)
            | ValidationError::WrongAnswerCardinality(..)
            | ValidationError::NonNumericAnswer(_) => "answer",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingQuestionText => "missing_question_text",
            ValidationError::InvalidAnswerFormat => "invalid_answer_format",
            ValidationError::MissingOptions(_) => "missing_options",
            ValidationError::AnswerKeyNotInOptions(_) => "answer_key_not_in_options",
            ValidationError::WrongAnswerCardinality(..) => "wrong_answer_cardinality",
            ValidationError::NonNumericAnswer(_) => "non_numeric_answer",
            ValidationError::UnsupportedQuestionType(_) => "unsupported_question_type",
        }
    }
}

impl TryFrom<Draft> for Payload {
    type Error = ValidationError;

    fn try_from(draft: Draft) -> Result<Self, Self::Error> {
        let question = match draft.question {
            Some(Value::String(q)) if !q.trim().is_empty() => q,
            _ => return Err(ValidationError::MissingQuestionText),
        };
        let answer = parse_answer(draft.answer)?;
        let type_ = match draft.type_ {
            None => QuestionType::default(),
            Some(Value::String(t)) => t.parse().map_err(ValidationError::UnsupportedQuestionType)?,
            Some(other) => return Err(ValidationError::UnsupportedQuestionType(other.to_string())),
        };
        match type_ {
            QuestionType::SingleChoice | QuestionType::MultipleChoice => {
                let options = parse_options(draft.options).ok_or(ValidationError::MissingOptions(type_))?;
                if let Some(key) = answer.iter().find(|k| !options.contains_key(k.as_str())) {
                    return Err(ValidationError::AnswerKeyNotInOptions(key.clone()));
                }
                Ok(if type_ == QuestionType::SingleChoice {
                    Payload::SingleChoice { question, options, answer }
                } else {
                    Payload::MultipleChoice { question, options, answer }
                })
            }
            QuestionType::Numeric | QuestionType::TextMatch => {
                let mut answer = answer;
                if answer.len() != 1 {
                    return Err(ValidationError::WrongAnswerCardinality(type_, answer.len()));
                }
                let answer = answer.remove(0);
                if type_ == QuestionType::Numeric {
                    if !is_number(&answer) {
                        return Err(ValidationError::NonNumericAnswer(answer));
                    }
                    return Ok(Payload::Numeric { question, answer });
                }
                Ok(Payload::TextMatch { question, answer })
            }
        }
    }
}

/// Answers are lists of strings, stored trimmed; bare JSON numbers are
/// accepted and kept in their decimal form.
fn parse_answer(answer: Option<Value>) -> Result<Vec<String>, ValidationError> {
    let items = match answer {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(ValidationError::InvalidAnswerFormat),
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_owned()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(ValidationError::InvalidAnswerFormat),
        })
        .collect()
}

fn parse_options(options: Option<Value>) -> Option<Options> {
    let map = match options {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return None,
    };
    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Some((key, OptionValue::Text(s))),
            Value::Number(n) => Some((key, OptionValue::Number(n))),
            _ => None,
        })
        .collect()
}

fn is_number(answer: &str) -> bool {
    answer.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn draft(v: Value) -> Draft {
        serde_json::from_value(v).unwrap()
    }

    fn validate(v: Value) -> Result<Payload, ValidationError> {
        Payload::try_from(draft(v))
    }

    #[test]
    fn test_valid_single_choice() {
        let payload = validate(json!({
            "question": "Capital of France?",
            "type": "single-choice",
            "options": {"a": "Paris", "b": "Lyon"},
            "answer": ["a"],
        }))
        .unwrap();
        assert_eq!(payload.type_(), QuestionType::SingleChoice);
        let (question, _, options, answer) = payload.into_columns();
        assert_eq!(question, "Capital of France?");
        assert_eq!(options.len(), 2);
        assert_eq!(answer, vec!["a".to_owned()]);
    }

    #[test]
    fn test_type_defaults_to_single_choice() {
        let payload = validate(json!({"question": "q", "options": {"a": 1, "b": 2}, "answer": ["b"]})).unwrap();
        assert_eq!(payload.type_(), QuestionType::SingleChoice);
    }

    #[test]
    fn test_missing_question_text() {
        assert_eq!(validate(json!({"answer": ["4"], "type": "numeric"})), Err(ValidationError::MissingQuestionText));
        assert_eq!(validate(json!({"question": "   ", "answer": ["4"], "type": "numeric"})), Err(ValidationError::MissingQuestionText));
    }

    #[test]
    fn test_non_string_question_text() {
        for question in [json!(42), json!(["q"]), json!({"text": "q"})] {
            let err = validate(json!({"question": question.clone(), "type": "numeric", "answer": ["4"]})).unwrap_err();
            assert_eq!(err, ValidationError::MissingQuestionText, "question {question}");
        }
    }

    #[test]
    fn test_non_string_type() {
        let err = validate(json!({"question": "q", "type": 5, "answer": ["a"]})).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedQuestionType("5".into()));
        let err = validate(json!({"question": "q", "type": ["numeric"], "answer": ["4"]})).unwrap_err();
        assert_eq!(err.code(), "unsupported_question_type");
    }

    #[test]
    fn test_answers_are_trimmed() {
        let payload = validate(json!({"question": "q", "type": "numeric", "answer": [" 4 "]})).unwrap();
        assert_eq!(payload.into_columns().3, vec!["4".to_owned()]);
        let payload = validate(json!({"question": "q", "options": {"a": "x"}, "answer": [" a"]})).unwrap();
        assert_eq!(payload.into_columns().3, vec!["a".to_owned()]);
    }

    #[test]
    fn test_question_text_is_checked_first() {
        let err = validate(json!({"type": "bogus"})).unwrap_err();
        assert_eq!(err, ValidationError::MissingQuestionText);
    }

    #[test]
    fn test_invalid_answer_format() {
        for answer in [json!(null), json!("a"), json!([]), json!({"a": 1}), json!([["a"]]), json!([""])] {
            let err = validate(json!({"question": "q", "options": {"a": "x"}, "answer": answer.clone()})).unwrap_err();
            assert_eq!(err, ValidationError::InvalidAnswerFormat, "answer {answer}");
        }
    }

    #[test]
    fn test_answer_checked_before_type() {
        let err = validate(json!({"question": "q", "type": "essay"})).unwrap_err();
        assert_eq!(err, ValidationError::InvalidAnswerFormat);
    }

    #[test]
    fn test_missing_options() {
        for options in [json!(null), json!({}), json!(["a", "b"]), json!({"a": {"nested": true}})] {
            let err = validate(json!({"question": "q", "type": "multiple-choice", "options": options, "answer": ["a"]})).unwrap_err();
            assert_eq!(err, ValidationError::MissingOptions(QuestionType::MultipleChoice));
            assert_eq!(err.field(), "options");
        }
    }

    #[test]
    fn test_answer_key_not_in_options() {
        let err = validate(json!({
            "question": "q",
            "type": "multiple-choice",
            "options": {"a": "x", "b": "y"},
            "answer": ["a", "c"],
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::AnswerKeyNotInOptions("c".into()));
        assert_eq!(err.code(), "answer_key_not_in_options");
    }

    #[test]
    fn test_numeric() {
        let payload = validate(json!({"question": "2+2?", "type": "numeric", "answer": ["4"]})).unwrap();
        assert_eq!(
            payload,
            Payload::Numeric {
                question: "2+2?".into(),
                answer: "4".into()
            }
        );
        let payload = validate(json!({"question": "pi?", "type": "numeric", "answer": [3.14]})).unwrap();
        assert_eq!(payload.into_columns().3, vec!["3.14".to_owned()]);
        assert!(validate(json!({"question": "q", "type": "numeric", "answer": ["-0.5"]})).is_ok());
    }

    #[test]
    fn test_non_numeric_answer() {
        for answer in ["abc", "NaN", "inf", "1,5"] {
            let err = validate(json!({"question": "q", "type": "numeric", "answer": [answer]})).unwrap_err();
            assert_eq!(err, ValidationError::NonNumericAnswer(answer.into()));
        }
    }

    #[test]
    fn test_wrong_answer_cardinality() {
        let err = validate(json!({"question": "q", "type": "text-match", "answer": ["paris", "lyon"]})).unwrap_err();
        assert_eq!(err, ValidationError::WrongAnswerCardinality(QuestionType::TextMatch, 2));
        let err = validate(json!({"question": "q", "type": "numeric", "answer": ["1", "abc"]})).unwrap_err();
        assert_eq!(err, ValidationError::WrongAnswerCardinality(QuestionType::Numeric, 2));
    }

    #[test]
    fn test_text_match_drops_options() {
        let payload = validate(json!({"question": "q", "type": "text-match", "options": {"a": "x"}, "answer": ["paris"]})).unwrap();
        let (_, type_, options, answer) = payload.into_columns();
        assert_eq!(type_, QuestionType::TextMatch);
        assert!(options.is_empty());
        assert_eq!(answer, vec!["paris".to_owned()]);
    }

    #[test]
    fn test_unsupported_question_type() {
        let err = validate(json!({"question": "q", "type": "essay", "answer": ["x"]})).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedQuestionType("essay".into()));
        assert_eq!(err.field(), "type");
    }
}
