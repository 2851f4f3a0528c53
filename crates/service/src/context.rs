use std::sync::Arc;

use tracing::info;

use crate::api::ApiClient;
use crate::auth::{AuthService, Navigator};
use crate::errors::ClientError;
use crate::file::FileSessionStore;
use crate::session::SessionStorage;
use crate::store::UserStore;
use crate::users::UserService;

/// Everything a UI needs, wired once and handed down explicitly.
///
/// Every handle shares the same session storage, so a token persisted by
/// `auth` is attached to requests made through `users`.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub users: Arc<UserService>,
    pub auth: Arc<AuthService>,
    pub store: UserStore,
}

impl AppContext {
    pub fn new(
        api_cfg: &configs::ApiConfig,
        token_key: &str,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let api = ApiClient::from_config(api_cfg).with_session(storage.clone(), token_key);
        let users = Arc::new(UserService::new(api.clone()));
        let auth = Arc::new(AuthService::new(api.clone(), storage, navigator).with_token_key(token_key));
        Self { api, users, auth, store: UserStore::new() }
    }

    /// Wire the context over file-backed session storage.
    pub async fn from_config(cfg: &configs::ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self, ClientError> {
        let storage = FileSessionStore::from_config(&cfg.session).await?;
        info!(base_url = %cfg.api.base_url, session = %cfg.session.path, "client context ready");
        Ok(Self::new(&cfg.api, &cfg.session.token_key, storage, navigator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::navigator::mock::RecordingNavigator;
    use crate::test_support::{spawn_backend, STUB_PASSWORD};
    use crate::users::UserApi;

    #[tokio::test]
    async fn login_token_flows_into_user_requests() -> anyhow::Result<()> {
        let backend = spawn_backend().await?;
        let dir = std::env::temp_dir().join(format!("sanctor_ctx_{}", uuid::Uuid::new_v4()));
        let cfg = configs::ClientConfig {
            api: configs::ApiConfig { base_url: backend.base_url.clone() },
            session: configs::SessionConfig {
                path: dir.join("session.json").to_string_lossy().into_owned(),
                token_key: "token".into(),
            },
        };
        let ctx = AppContext::from_config(&cfg, Arc::new(RecordingNavigator::default())).await?;

        ctx.auth.login("a@x.com", STUB_PASSWORD).await?;
        ctx.users.list().await?;
        assert_eq!(backend.last_authorization().as_deref(), Some("Bearer abc"));

        ctx.auth.logout().await?;
        ctx.users.list().await?;
        assert_eq!(backend.last_authorization(), None);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
