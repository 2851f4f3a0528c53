//! Types shared with the backend. Field names follow the backend's JSON
//! (camelCase), so these serialize straight onto the wire.

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod envelope;
pub mod user;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use envelope::{ApiOutcome, ApiResponse, EnvelopeError};
pub use user::{CreateUserRequest, InputError, UpdateUserRequest, User};

/// Payload of the backend's root health endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool { self.status.eq_ignore_ascii_case("healthy") }
}
