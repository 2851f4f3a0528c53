use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw response envelope as it travels on the wire. Both `data` and `error`
/// are optional here; use [`ApiResponse::into_outcome`] to get a value with
/// exactly one populated branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
}

/// Envelope with exactly one meaningful branch.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success { data: T, message: String },
    Failure { error: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("envelope carries both data and error: {0}")]
    Ambiguous(String),
    #[error("envelope carries neither data nor error: {0}")]
    Empty(String),
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self { data: Some(data), error: None, message: message.into() }
    }

    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self { data: None, error: Some(error.into()), message: message.into() }
    }

    /// An empty `error` string is treated as absent, matching how the backend
    /// omits it (`omitempty`).
    pub fn into_outcome(self) -> Result<ApiOutcome<T>, EnvelopeError> {
        let error = self.error.filter(|e| !e.is_empty());
        match (self.data, error) {
            (Some(data), None) => Ok(ApiOutcome::Success { data, message: self.message }),
            (None, Some(error)) => Ok(ApiOutcome::Failure { error, message: self.message }),
            (Some(_), Some(_)) => Err(EnvelopeError::Ambiguous(self.message)),
            (None, None) => Err(EnvelopeError::Empty(self.message)),
        }
    }
}

impl<T> ApiOutcome<T> {
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiOutcome::Success { data, .. } => Ok(data),
            ApiOutcome::Failure { error, .. } => Err(error),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiOutcome::Success { message, .. } | ApiOutcome::Failure { message, .. } => message,
        }
    }
}
