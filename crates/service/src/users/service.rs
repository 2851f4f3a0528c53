use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument};

use common::types::{CreateUserRequest, UpdateUserRequest, User};

use crate::api::ApiClient;
use crate::errors::ClientError;

/// One call per remote user operation. Implementations let failures
/// propagate unchanged.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, ClientError>;
    async fn get(&self, id: &str) -> Result<User, ClientError>;
    async fn create(&self, input: &CreateUserRequest) -> Result<User, ClientError>;
    async fn update(&self, id: &str, patch: &UpdateUserRequest) -> Result<User, ClientError>;
    /// Deleting an id that is already gone surfaces `NotFound`.
    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}

/// HTTP implementation against `/api/users`.
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self { Self { api } }
}

#[async_trait]
impl UserApi for UserService {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, ClientError> {
        self.api.get_json("/api/users", &[]).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<User, ClientError> {
        self.api.get_json("/api/users/get", &[("id", id)]).await
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn create(&self, input: &CreateUserRequest) -> Result<User, ClientError> {
        let user: User = self.api.send_json(Method::POST, "/api/users/create", &[], input).await?;
        info!(user_id = %user.id, "user_created");
        Ok(user)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: &UpdateUserRequest) -> Result<User, ClientError> {
        let user: User = self.api.send_json(Method::PUT, "/api/users/update", &[("id", id)], patch).await?;
        info!(user_id = %user.id, "user_updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.api.send_empty(Method::DELETE, "/api/users/delete", &[("id", id)]).await?;
        info!(user_id = %id, "user_deleted");
        Ok(())
    }
}
