use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use common::types::{UpdateUserRequest, User};

/// Snapshot of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStoreState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Shallow merge onto a [`User`]: present fields overwrite, absent ones are
/// kept. `id` is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(v) = self.email { user.email = v; }
        if let Some(v) = self.username { user.username = v; }
        if let Some(v) = self.first_name { user.first_name = v; }
        if let Some(v) = self.last_name { user.last_name = v; }
        if let Some(v) = self.created_at { user.created_at = v; }
        if let Some(v) = self.updated_at { user.updated_at = v; }
    }
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(r: UpdateUserRequest) -> Self {
        Self { email: r.email, username: r.username, first_name: r.first_name, last_name: r.last_name, ..Default::default() }
    }
}

/// A full record from the server replaces every field but `id`.
impl From<User> for UserPatch {
    fn from(u: User) -> Self {
        Self {
            email: Some(u.email),
            username: Some(u.username),
            first_name: Some(u.first_name),
            last_name: Some(u.last_name),
            created_at: Some(u.created_at),
            updated_at: Some(u.updated_at),
        }
    }
}

/// In-memory user collection with independent `loading`/`error` flags.
///
/// Not networked: callers fetch through the service layer and push results
/// in. Every operation is synchronous and total. Clones are handles onto the
/// same state, so one store can be handed to every component that needs it;
/// `subscribe` yields a receiver notified after each mutation.
#[derive(Clone)]
pub struct UserStore {
    state: Arc<watch::Sender<UserStoreState>>,
}

impl Default for UserStore {
    fn default() -> Self { Self::new() }
}

impl UserStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(UserStoreState::default());
        Self { state: Arc::new(state) }
    }

    /// Replace the whole collection.
    pub fn set_users(&self, users: Vec<User>) {
        self.state.send_modify(|s| s.users = users);
    }

    /// Append; duplicate ids are not checked.
    pub fn add_user(&self, user: User) {
        self.state.send_modify(|s| s.users.push(user));
    }

    /// Merge `patch` into every user with `id`, in place. No-op when absent.
    pub fn update_user(&self, id: &str, patch: impl Into<UserPatch>) {
        let patch = patch.into();
        self.state.send_if_modified(|s| {
            let mut matched = false;
            for user in s.users.iter_mut().filter(|u| u.id == id) {
                patch.clone().apply(user);
                matched = true;
            }
            matched
        });
    }

    /// Remove the user with `id`. No-op when absent.
    pub fn delete_user(&self, id: &str) {
        self.state.send_if_modified(|s| {
            let before = s.users.len();
            s.users.retain(|u| u.id != id);
            s.users.len() != before
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| s.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|s| s.error = error);
    }

    pub fn snapshot(&self) -> UserStoreState { self.state.borrow().clone() }

    pub fn users(&self) -> Vec<User> { self.state.borrow().users.clone() }

    pub fn find(&self, id: &str) -> Option<User> {
        self.state.borrow().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn loading(&self) -> bool { self.state.borrow().loading }

    pub fn error(&self) -> Option<String> { self.state.borrow().error.clone() }

    pub fn subscribe(&self) -> watch::Receiver<UserStoreState> { self.state.subscribe() }
}
