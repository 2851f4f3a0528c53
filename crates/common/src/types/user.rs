use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity record as returned by the backend.
///
/// `id`, `created_at` and `updated_at` are assigned by the server and never
/// sent back by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last" when both parts are present, otherwise the username.
    pub fn full_name(&self) -> String {
        if !self.first_name.is_empty() && !self.last_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            self.username.clone()
        }
    }
}

/// Body of `POST /api/users/create`. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl CreateUserRequest {
    /// Mirrors the backend's input rules so a form can reject early.
    /// The service layer does not call this; the server stays authoritative.
    pub fn validate(&self) -> Result<(), InputError> {
        validate_account(&self.email, &self.username, &self.password)
    }
}

/// Partial patch for `PUT /api/users/update?id=<id>`.
/// Absent fields are omitted from the body and left unchanged server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Client-side input rejections, worded like the backend's messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("email and username are required")]
    MissingIdentity,
    #[error("invalid email format")]
    InvalidEmail,
    #[error("username must be at least 3 characters")]
    UsernameTooShort,
    #[error("username must be less than 20 characters")]
    UsernameTooLong,
    #[error("password must be at least 8 characters")]
    PasswordTooShort,
}

/// Rules shared by account creation and registration. Lengths are byte
/// counts, as the backend measures them.
pub(crate) fn validate_account(email: &str, username: &str, password: &str) -> Result<(), InputError> {
    if email.trim().is_empty() || username.trim().is_empty() {
        return Err(InputError::MissingIdentity);
    }
    validate_email(email)?;
    validate_username(username)?;
    validate_password(password)
}

fn validate_email(email: &str) -> Result<(), InputError> {
    if email.len() > 3 && email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(InputError::InvalidEmail)
    }
}

fn validate_username(username: &str) -> Result<(), InputError> {
    let len = username.len();
    if len < 3 {
        return Err(InputError::UsernameTooShort);
    }
    if len > 20 {
        return Err(InputError::UsernameTooLong);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), InputError> {
    if password.len() < 8 {
        return Err(InputError::PasswordTooShort);
    }
    Ok(())
}
