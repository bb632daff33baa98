// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error response.
/// DatabaseError carries a generic message only; driver text goes to the log.
#[derive(Error, Debug)]
pub enum SchoolError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("{0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,
}

impl SchoolError {
    /// Map a driver error to a generic failure, logging the detail
    /// DOCUMENTATION: Duplicate keys become AlreadyExists, foreign-key conflicts
    /// become InvalidInput; anything else is a generic DatabaseError
    pub fn from_sqlx(context: &str, label: &str, e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                log::warn!("{}: duplicate {}", context, label);
                return SchoolError::AlreadyExists(label.to_string());
            }
            if db.is_foreign_key_violation() {
                log::warn!("{}: {} is referenced or references a missing row", context, label);
                return SchoolError::InvalidInput(format!(
                    "{} is linked to records that prevent this change",
                    label
                ));
            }
        }

        log::error!("{}: {}", context, e);
        SchoolError::DatabaseError(context.to_string())
    }
}

/// Convert SchoolError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for SchoolError {
    fn error_response(&self) -> HttpResponse {
        let error_code = match self {
            SchoolError::NotFound(_) => "NOT_FOUND",
            SchoolError::AlreadyExists(_) => "ALREADY_EXISTS",
            SchoolError::DatabaseError(_) => "DATABASE_ERROR",
            SchoolError::InvalidInput(_) => "INVALID_INPUT",
            SchoolError::ValidationError(_) => "VALIDATION_ERROR",
            SchoolError::Unauthorized => "UNAUTHORIZED",
            SchoolError::Forbidden => "FORBIDDEN",
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            SchoolError::NotFound(_) => StatusCode::NOT_FOUND,
            SchoolError::AlreadyExists(_) => StatusCode::CONFLICT,
            SchoolError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SchoolError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SchoolError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SchoolError::Unauthorized => StatusCode::UNAUTHORIZED,
            SchoolError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_hides_driver_text() {
        let err = SchoolError::from_sqlx(
            "Failed to fetch subjects",
            "Subject",
            sqlx::Error::Protocol("table 'school.subjects' doesn't exist".to_string()),
        );

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to fetch subjects");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SchoolError::NotFound("Semester".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SchoolError::AlreadyExists("Grade level".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(SchoolError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            SchoolError::NotFound("School year".into()).to_string(),
            "School year not found"
        );
    }
}
