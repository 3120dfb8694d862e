//! Bridge error type
//!
//! Every failure leaves the bridge as a `{"message": ..}` body, the same shape
//! as a successful acknowledgment.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::BridgeMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Missing or unknown `command` parameter
    #[error("Invalid command")]
    InvalidCommand,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BridgeError {
    pub fn status(&self) -> StatusCode {
        match self {
            BridgeError::InvalidCommand => StatusCode::BAD_REQUEST,
            BridgeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Bridge error");
        }
        (status, Json(BridgeMessage::new(self.to_string()))).into_response()
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
