//! User resource: the HTTP service and the collection hook built on it.

pub mod hook;
pub mod service;

pub use hook::{UsersHook, UsersState};
pub use service::{UserApi, UserService};
