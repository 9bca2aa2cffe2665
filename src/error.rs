//! Typed errors and HTTP mapping.

use crate::response::{error_message, server_error_body};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid APP_ENV '{0}': expected production, development or test")]
    InvalidMode(String),
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),
}

/// Failures raised by a row store. Constraint variants mirror what PostgreSQL
/// reports so the in-memory store fails the same way.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("null value in column \"{column}\" of relation \"{table}\" violates not-null constraint")]
    NotNull { table: &'static str, column: &'static str },
    #[error("insert or update on table \"{table}\" violates foreign key constraint on column \"{column}\"")]
    ForeignKey { table: &'static str, column: &'static str },
    #[error("duplicate key value violates unique constraint on \"{table}\".\"{column}\"")]
    Unique { table: &'static str, column: &'static str },
    #[error("invalid value for column \"{column}\" of relation \"{table}\": {reason}")]
    InvalidValue {
        table: &'static str,
        column: &'static str,
        reason: String,
    },
    #[error("decode row: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid database url: {0}")]
    InvalidUrl(String),
    #[error("row store lock poisoned")]
    Poisoned,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// Body extractor rejected the request (malformed JSON, wrong content type, too large).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                tracing::warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, Json(error_message(&message))).into_response()
            }
            AppError::NotFound(message) => {
                tracing::warn!(%message, "not found");
                (StatusCode::NOT_FOUND, Json(error_message(&message))).into_response()
            }
            AppError::Rejected { status, message } => {
                tracing::warn!(%status, %message, "request rejected");
                (status, Json(error_message(&message))).into_response()
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "row store failure");
                server_error_response(&e.to_string())
            }
        }
    }
}

/// 500 with the detail included. Production mode rewrites the body on the way out.
pub fn server_error_response(detail: &str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(server_error_body(detail))).into_response()
}
