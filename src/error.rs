use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::templates::error_page;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Constraint violated: {0}")]
    ConstraintViolated(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ConstraintViolated(_) => StatusCode::CONFLICT,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a visitor. Store internals stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::ConstraintViolated(msg) => msg.clone(),
            Self::Validation { field, message } => format!("{}: {}", field, message),
            Self::StoreUnavailable(_) => "The database is unavailable, try again later".to_string(),
            Self::Database(_) => "An unexpected error occurred".to_string(),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                return Self::ConstraintViolated(
                    "The referenced artist or venue does not exist".to_string(),
                )
            }
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                return Self::ConstraintViolated("A record with these values already exists".to_string())
            }
            _ => {}
        }

        match err {
            DbErr::ConnectionAcquire(ref e) => Self::StoreUnavailable(e.to_string()),
            DbErr::Conn(ref e) => Self::StoreUnavailable(e.to_string()),
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            other => Self::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::Database(ref e) => tracing::error!("Database error: {}", e),
            Self::StoreUnavailable(ref e) => tracing::error!("Store unavailable: {}", e),
            Self::ConstraintViolated(ref msg) => tracing::warn!("Constraint violated: {}", msg),
            Self::NotFound(_) | Self::Validation { .. } => {}
        }

        (status, Html(error_page(status, &self.public_message()).into_string())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let err: AppError = DbErr::RecordNotFound("venue 4".to_string()).into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_db_errors_are_internal() {
        let err: AppError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.public_message(), "An unexpected error occurred");
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = AppError::validation("phone", "is required");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.public_message(), "phone: is required");
    }
}
