use serde::{Deserialize, Serialize};

use super::user::{validate_account, InputError};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), InputError> {
        validate_account(&self.email, &self.username, &self.password)
    }
}

/// Login/register response. Every field is optional: the backend may answer
/// with only a `message` when no session was issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponse {
    /// The issued token, if any. Empty strings count as no token.
    pub fn session_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_without_token() {
        let resp: AuthResponse = serde_json::from_str(r#"{"message":"Login endpoint - TODO"}"#).unwrap();
        assert_eq!(resp.session_token(), None);

        let resp: AuthResponse = serde_json::from_str(r#"{"token":""}"#).unwrap();
        assert_eq!(resp.session_token(), None);

        let resp: AuthResponse =
            serde_json::from_str(r#"{"token":"abc","refreshToken":"r","expiresAt":"2030-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(resp.session_token(), Some("abc"));
        assert_eq!(resp.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn register_request_validation() {
        let req = RegisterRequest {
            email: "new@example.com".into(),
            username: "newbie".into(),
            password: "longenough".into(),
            first_name: "New".into(),
            last_name: "Bie".into(),
        };
        assert_eq!(req.validate(), Ok(()));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["firstName"], "New");

        let bad = RegisterRequest { email: "nope".into(), ..req };
        assert_eq!(bad.validate(), Err(InputError::InvalidEmail));
    }
}
