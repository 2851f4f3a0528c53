//! HTTP plumbing shared by every service: base URL handling, bearer token
//! attachment, status classification and payload decoding.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use common::types::{ApiResponse, HealthResponse};

use crate::errors::ClientError;
use crate::session::SessionStorage;

#[derive(Clone)]
struct SessionHandle {
    storage: Arc<dyn SessionStorage>,
    token_key: String,
}

/// Thin client over one backend. Cheap to clone; clones share the
/// connection pool and session storage.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Option<SessionHandle>,
}

impl ApiClient {
    /// No timeout is configured: the HTTP client's defaults apply.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: Client::new(), base_url, session: None }
    }

    pub fn from_config(cfg: &configs::ApiConfig) -> Self { Self::new(cfg.base_url.clone()) }

    /// Attach session storage; a token stored under `token_key` is sent as
    /// `Authorization: Bearer` on every request.
    pub fn with_session(mut self, storage: Arc<dyn SessionStorage>, token_key: impl Into<String>) -> Self {
        self.session = Some(SessionHandle { storage, token_key: token_key.into() });
        self
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    pub fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

    /// `GET /` on the backend.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health_check(&self) -> Result<HealthResponse, ClientError> {
        self.get_json("/", &[]).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ClientError> {
        let resp = self.dispatch(self.request(Method::GET, path).query(query)).await?;
        decode(resp).await
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, query: &[(&str, &str)], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.dispatch(self.request(method, path).query(query).json(body)).await?;
        decode(resp).await
    }

    /// For endpoints whose success body is an acknowledgement (or empty).
    pub async fn send_empty(&self, method: Method, path: &str, query: &[(&str, &str)]) -> Result<(), ClientError> {
        self.dispatch(self.request(method, path).query(query)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    async fn dispatch(&self, mut rb: RequestBuilder) -> Result<Response, ClientError> {
        if let Some(token) = self.session_token().await {
            rb = rb.bearer_auth(token);
        }
        let resp = rb.send().await.map_err(|e| {
            warn!(error = %e, "request failed before a response arrived");
            ClientError::from(e)
        })?;

        let status = resp.status();
        debug!(path = %resp.url().path(), %status, "response received");
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = ClientError::from_status(status, error_message(&body));
        warn!(%status, error = %err, "backend rejected request");
        Err(err)
    }

    async fn session_token(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        session.storage.get_item(&session.token_key).await.filter(|t| !t.is_empty())
    }
}

/// Accept either the bare payload (what the backend sends today) or an
/// envelope wrapping it. A JSON object carrying `data` or `error` is always
/// read as an envelope, so payload types with all-optional fields cannot
/// swallow one.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let bytes = resp.bytes().await?;
    if !is_envelope(&bytes) {
        return serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()));
    }
    let envelope: ApiResponse<T> = serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;
    let outcome = envelope.into_outcome().map_err(|e| ClientError::Decode(e.to_string()))?;
    outcome.into_result().map_err(ClientError::Validation)
}

fn is_envelope(bytes: &[u8]) -> bool {
    matches!(
        serde_json::from_slice::<serde_json::Value>(bytes),
        Ok(serde_json::Value::Object(obj)) if obj.contains_key("data") || obj.contains_key("error")
    )
}

/// Best human-readable message in an error body: envelope `error`, then
/// `message`, then the plain text the backend writes with `http.Error`.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(serde_json::Value::Object(obj)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let pick = |k: &str| obj.get(k).and_then(|v| v.as_str()).map(str::trim).filter(|s| !s.is_empty());
        return pick("error").or_else(|| pick("message")).map(str::to_string);
    }
    Some(trimmed.to_string())
}
