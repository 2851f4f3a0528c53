use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use common::types::User;

use super::service::UserApi;

/// Collection view of the user list. Starts out loading with no users.
#[derive(Debug, Clone, PartialEq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for UsersState {
    fn default() -> Self {
        Self { users: Vec::new(), loading: true, error: None }
    }
}

/// Keeps the full user list in sync with the backend.
///
/// Unlike [`crate::fetch::ApiHook`], failures are recorded but never
/// returned, and a stale `error` stays visible until a fetch succeeds.
pub struct UsersHook<A: UserApi + ?Sized> {
    api: Arc<A>,
    state: watch::Sender<UsersState>,
}

impl<A: UserApi + ?Sized> UsersHook<A> {
    /// Create the hook without fetching; state stays in its initial loading form.
    pub fn new(api: Arc<A>) -> Self {
        let (state, _) = watch::channel(UsersState::default());
        Self { api, state }
    }

    /// Create the hook and fetch immediately.
    pub async fn mount(api: Arc<A>) -> Self {
        let hook = Self::new(api);
        hook.refetch().await;
        hook
    }

    pub async fn refetch(&self) {
        self.state.send_modify(|s| s.loading = true);
        match self.api.list().await {
            Ok(users) => self.state.send_modify(|s| {
                s.users = users;
                s.error = None;
                s.loading = false;
            }),
            Err(e) => {
                warn!(error = %e, "fetching users failed");
                let message = e.message().to_string();
                self.state.send_modify(|s| {
                    s.error = Some(message);
                    s.loading = false;
                });
            }
        }
    }

    pub fn state(&self) -> UsersState { self.state.borrow().clone() }

    pub fn users(&self) -> Vec<User> { self.state.borrow().users.clone() }

    pub fn loading(&self) -> bool { self.state.borrow().loading }

    pub fn error(&self) -> Option<String> { self.state.borrow().error.clone() }

    pub fn subscribe(&self) -> watch::Receiver<UsersState> { self.state.subscribe() }
}
