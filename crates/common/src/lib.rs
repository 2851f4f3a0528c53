//! Shared wire types mirroring the backend API, plus logging bootstrap
//! used by every binary in the workspace.

pub mod types;
pub mod utils;

pub use types::{
    ApiOutcome, ApiResponse, AuthResponse, CreateUserRequest, EnvelopeError, HealthResponse,
    InputError, LoginRequest, RegisterRequest, UpdateUserRequest, User,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h: HealthResponse =
            serde_json::from_str(r#"{"message":"Sanctor API is running","status":"healthy"}"#).unwrap();
        assert_eq!(h.status, "healthy");
        assert!(h.is_healthy());
    }
}
