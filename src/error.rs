//! Error types for the remote store and the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::api::responses::ErrorResponse;

/// Failures talking to a state backend. These never reach an HTTP caller;
/// `RemoteStateStore` logs and absorbs them.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote store returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("file {0} not found in gist")]
    MissingFile(String),

    #[error("malformed record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced to HTTP callers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid action")]
    InvalidAction,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidAction | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Rejecting request ({}): {}", status, self);
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
