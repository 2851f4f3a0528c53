use reqwest::StatusCode;
use thiserror::Error;

/// Message recorded when a failure carries no text of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Failures surfaced by the data service layer.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Transport failure; no response was received.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response without a recognized validation payload.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// The server rejected the input.
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A 2xx body that does not match the expected payload.
    #[error("decode error: {0}")]
    Decode(String),
    /// Durable session storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Human-readable message without the variant prefix, as shown to users.
    pub fn message(&self) -> &str {
        let msg = match self {
            ClientError::Network(m)
            | ClientError::Validation(m)
            | ClientError::NotFound(m)
            | ClientError::Decode(m)
            | ClientError::Storage(m) => m,
            ClientError::Server { message, .. } => message,
        };
        if msg.trim().is_empty() { GENERIC_ERROR_MESSAGE } else { msg }
    }

    /// Map a non-2xx status plus the best message extracted from its body.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        let fallback = || status.canonical_reason().unwrap_or("request failed").to_string();
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message.unwrap_or_else(fallback)),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY if message.is_some() => {
                ClientError::Validation(message.unwrap_or_default())
            }
            _ => ClientError::Server { status: status.as_u16(), message: message.unwrap_or_else(fallback) },
        }
    }

    pub fn is_not_found(&self) -> bool { matches!(self, ClientError::NotFound(_)) }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::from_status(status, None)
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
