//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("config load: {0}")]
    Load(#[from] ::config::ConfigError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("customer id {0} already exists")]
    DuplicateId(i32),
    /// Row targeted by a staged update or removal disappeared before commit.
    #[error("customer id {0} no longer exists")]
    Missing(i32),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    NotFound {
        message: &'static str,
        status: StatusCode,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub const INTERNAL_ERROR_BODY: &str = "Internal server error.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound { message, status } => (status, message).into_response(),
            AppError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}
