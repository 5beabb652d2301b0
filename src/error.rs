//! Typed errors and HTTP mapping.

use crate::service::Rejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("status catalog load: {0}")]
    Load(String),
    #[error("status catalog: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
    #[error("query exceeded {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl From<sqlx::Error> for AppError {
    /// Splits store errors into caller-correctable constraint violations and backend failures.
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => return AppError::Constraint(db.message().to_string()),
                _ => {}
            }
        }
        AppError::Db(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Rejected(_) => StatusCode::BAD_REQUEST,
            AppError::Constraint(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::NotFound(_) => "not_found",
            AppError::Rejected(_) => "validation_error",
            AppError::Constraint(_) => "constraint_violation",
            AppError::BadRequest(_) => "bad_request",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Db(sqlx::Error::RowNotFound) => "not_found",
            AppError::Db(_) => "database_error",
            AppError::Timeout(_) => "timeout",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Db(_) | AppError::Timeout(_) | AppError::Config(_) => {
                tracing::error!(error = %self, "request failed");
            }
            AppError::Constraint(_) => tracing::warn!(error = %self, "store rejected mutation"),
            _ => {}
        }
        let details = match &self {
            AppError::Rejected(r) => Some(serde_json::json!({ "field": r.field() })),
            _ => None,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Rejection;

    #[test]
    fn rejections_map_to_bad_request() {
        let err = AppError::from(Rejection::NonPositive { field: "precio" });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "validation_error");
        assert_eq!(err.to_string(), "precio must be greater than 0");
    }

    #[test]
    fn backend_failures_map_to_internal_error() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::Db(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::Timeout(Duration::from_millis(250));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "query exceeded 250ms");
    }

    #[test]
    fn oversized_bodies_map_to_413() {
        let err = AppError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.code(), "payload_too_large");
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        assert_eq!(AppError::NotFound("7".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Db(sqlx::Error::RowNotFound).status(), StatusCode::NOT_FOUND);
    }
}
