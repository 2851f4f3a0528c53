use std::path::Path;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_PATH: &str = "data/session.json";
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "API_URL";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

/// Where the session token survives between runs, and the key it is kept
/// under.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { path: default_session_path(), token_key: default_token_key() }
    }
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_session_path() -> String { DEFAULT_SESSION_PATH.to_string() }
fn default_token_key() -> String { DEFAULT_TOKEN_KEY.to_string() }

/// Load from `$CONFIG_PATH` (default `client.toml`). A missing file is not an
/// error: every field has a default.
pub fn load_default() -> Result<ClientConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "client.toml".to_string());
    if !Path::new(&path).exists() {
        debug!(%path, "config file not found, using defaults");
        return Ok(ClientConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl ClientConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.normalize();
        self.api.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

impl ApiConfig {
    pub fn normalize_from_env(&mut self) {
        self.apply_override(std::env::var(API_URL_ENV).ok());
    }

    /// A blank override is ignored.
    pub fn apply_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
    }

    fn normalize(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = trimmed.to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("api.base_url is empty; set it in the config file or via {API_URL_ENV}"));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        Ok(())
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(anyhow!("session.path must not be empty"));
        }
        if self.token_key.trim().is_empty() {
            return Err(anyhow!("session.token_key must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.api.base_url, "http://localhost:8080");
        assert_eq!(cfg.session.path, "data/session.json");
        assert_eq!(cfg.session.token_key, "token");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let cfg = load_from_str("[api]\nbase_url = \"https://api.example.com/\"\n").unwrap();
        assert_eq!(cfg.api.base_url, "https://api.example.com/");
        assert_eq!(cfg.session, SessionConfig::default());
    }

    #[test]
    fn override_and_normalize() {
        let mut api = ApiConfig::default();
        api.apply_override(Some("   ".into()));
        assert_eq!(api.base_url, DEFAULT_BASE_URL);

        api.apply_override(Some("http://10.0.0.5:9000/".into()));
        api.normalize();
        assert_eq!(api.base_url, "http://10.0.0.5:9000");
        assert!(api.validate().is_ok());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let api = ApiConfig { base_url: "ftp://example.com".into() };
        assert!(api.validate().is_err());
        let api = ApiConfig { base_url: String::new() };
        assert!(api.validate().is_err());

        let session = SessionConfig { token_key: " ".into(), ..SessionConfig::default() };
        assert!(session.validate().is_err());
    }
}
