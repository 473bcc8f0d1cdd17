use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;

use crate::core::validation::ValidationError;
use crate::thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("question not found")]
    NotFound,

    #[error("no questions available, create some questions first")]
    NoQuestionsAvailable,

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("dotenv error: {0}")]
    DotEnvError(#[from] dotenv::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Error::NotFound,
            e => Error::DatabaseError(e),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) | Error::InvalidPagination(_) | Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::NoQuestionsAvailable => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            Error::ValidationError(e) => json!({
                "error": e.to_string(),
                "field": e.field(),
                "code": e.code(),
            }),
            _ if status.is_server_error() => {
                error!("{}", self);
                json!({ "error": "internal server error" })
            }
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::question::QuestionType;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::from(ValidationError::MissingOptions(QuestionType::SingleChoice)).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::InvalidPagination("limit".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::from(sqlx::Error::RowNotFound).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::NoQuestionsAvailable.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::from(sqlx::Error::PoolTimedOut).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
