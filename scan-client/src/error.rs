//! Client error types

use reqwest::StatusCode;
use shared::BridgeMessage;
use thiserror::Error;

/// Client error type
///
/// The `Display` text of each variant is what the operator sees for a search
/// error; actions that phrase failures differently (registration, printing)
/// build their own message from the variant.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Barcode was empty after trimming
    #[error("Please enter a barcode.")]
    EmptyInput,

    /// No product for the barcode
    #[error("Product not found!")]
    NotFound,

    /// Server answered with an error status
    #[error("Server error: {} - {body}", status.as_u16())]
    Remote { status: StatusCode, body: String },

    /// Request was sent but no response came back
    #[error("Could not fetch the product. Check your internet connection.")]
    NetworkUnreachable(String),

    /// Response body was not what the endpoint promises
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built
    #[error("Request error: {0}")]
    Request(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// `message` field of a `{ "message": .. }` error body, if the server sent one
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Remote { body, .. } => serde_json::from_str::<BridgeMessage>(body)
                .ok()
                .map(|m| m.message),
            _ => None,
        }
    }

    /// Underlying transport or library text, for alerts and logs
    pub fn detail(&self) -> String {
        match self {
            Self::NetworkUnreachable(detail)
            | Self::InvalidResponse(detail)
            | Self::Request(detail)
            | Self::Config(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            Self::Request(e.to_string())
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::NetworkUnreachable(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_display_carries_status_and_body() {
        let err = ClientError::Remote {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "Server error: 500 - boom");
    }

    #[test]
    fn test_server_message() {
        let err = ClientError::Remote {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"message":"Invalid command"}"#.into(),
        };
        assert_eq!(err.server_message().as_deref(), Some("Invalid command"));

        let plain = ClientError::Remote {
            status: StatusCode::BAD_GATEWAY,
            body: "<html>".into(),
        };
        assert!(plain.server_message().is_none());
        assert!(ClientError::NotFound.server_message().is_none());
    }

    #[test]
    fn test_detail_prefers_transport_text() {
        let err = ClientError::NetworkUnreachable("connection refused".into());
        assert_eq!(err.detail(), "connection refused");
        assert_eq!(ClientError::NotFound.detail(), "Product not found!");
    }
}
