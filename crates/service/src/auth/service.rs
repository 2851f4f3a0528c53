use std::sync::Arc;

use reqwest::Method;
use tracing::{debug, info, instrument};

use common::types::{AuthResponse, LoginRequest, RegisterRequest};

use super::navigator::{Navigator, LOGIN_ROUTE};
use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::session::SessionStorage;

/// Login, registration and logout. A token returned by the backend is kept
/// in session storage under `token_key`; its presence is what
/// `is_authenticated` reports.
pub struct AuthService {
    api: ApiClient,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    token_key: String,
}

impl AuthService {
    pub fn new(api: ApiClient, storage: Arc<dyn SessionStorage>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, storage, navigator, token_key: configs::DEFAULT_TOKEN_KEY.to_string() }
    }

    pub fn with_token_key(mut self, token_key: impl Into<String>) -> Self {
        self.token_key = token_key.into();
        self
    }

    /// `POST /api/auth/login`; persists the token when one is issued.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest { email: email.to_string(), password: password.to_string() };
        let resp: AuthResponse = self.api.send_json(Method::POST, "/api/auth/login", &[], &body).await?;
        self.persist_session(&resp).await?;
        Ok(resp)
    }

    /// `POST /api/auth/register`; persists the token when one is issued.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let resp: AuthResponse = self.api.send_json(Method::POST, "/api/auth/register", &[], input).await?;
        self.persist_session(&resp).await?;
        Ok(resp)
    }

    /// Drop the stored token and navigate to the login view.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::api::ApiClient;
    /// use service::auth::{navigator::mock::RecordingNavigator, AuthService};
    /// use service::session::{mock::MemorySessionStorage, SessionStorage};
    ///
    /// let storage = Arc::new(MemorySessionStorage::default());
    /// let nav = Arc::new(RecordingNavigator::default());
    /// let auth = AuthService::new(ApiClient::new("http://localhost:8080"), storage.clone(), nav.clone());
    /// tokio_test::block_on(storage.set_item("token", "abc".into())).unwrap();
    /// assert!(tokio_test::block_on(auth.is_authenticated()));
    ///
    /// tokio_test::block_on(auth.logout()).unwrap();
    /// assert!(!tokio_test::block_on(auth.is_authenticated()));
    /// assert_eq!(nav.routes(), vec!["/login".to_string()]);
    /// ```
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ClientError> {
        let existed = self.storage.remove_item(&self.token_key).await?;
        debug!(existed, "session token cleared");
        self.navigator.navigate(LOGIN_ROUTE);
        Ok(())
    }

    /// True when a non-empty token is stored.
    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }

    pub async fn token(&self) -> Option<String> {
        self.storage.get_item(&self.token_key).await.filter(|t| !t.is_empty())
    }

    async fn persist_session(&self, resp: &AuthResponse) -> Result<(), ClientError> {
        if let Some(token) = resp.session_token() {
            self.storage.set_item(&self.token_key, token.to_string()).await?;
            info!("session_started");
        }
        Ok(())
    }
}
