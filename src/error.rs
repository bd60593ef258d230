//! Application error type and its HTTP mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,
    /// The acting user has no standing on the record. Reported to clients
    /// exactly like [`AppError::NotFound`].
    #[error("Acting user is not allowed to perform this operation")]
    Forbidden,
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    /// Reports a unique-constraint violation as [`AppError::Conflict`]; any
    /// other database error is kept as is.
    pub fn on_unique_violation(err: DbErr, message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                log::debug!("Unique constraint rejected write: {}", detail);
                AppError::conflict(message)
            }
            _ => AppError::Database(err),
        }
    }

    fn public_message(&self) -> String {
        match self {
            // Forbidden must be indistinguishable from a missing record.
            AppError::NotFound | AppError::Forbidden => "Resource not found".to_string(),
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound | AppError::Forbidden => StatusCode::NOT_FOUND,
            AppError::InvalidState(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self, AppError::Database(_) | AppError::Internal(_)) {
            log::error!("Request failed: {:?}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_is_reported_as_not_found() {
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Forbidden.public_message(),
            AppError::NotFound.public_message()
        );
    }

    #[test]
    fn state_errors_map_to_conflict() {
        assert_eq!(
            AppError::InvalidState("already accepted").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::conflict("duplicate").status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn database_errors_are_redacted() {
        let err = AppError::from(DbErr::Custom("table users is on fire".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn other_database_errors_are_not_conflicts() {
        let err = AppError::on_unique_violation(DbErr::Custom("timeout".to_string()), "taken");
        assert!(matches!(err, AppError::Database(_)));
    }
}
