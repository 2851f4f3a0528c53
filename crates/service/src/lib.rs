//! Client-side data layer for the Sanctor user-management backend.
//! - `api`, `users`, `auth`, `health`: typed calls against the REST API.
//! - `fetch`, `users::hook`: observable loading/error/data state around those calls.
//! - `store`: in-memory user collection shared through [`context::AppContext`].
//! - `session`, `storage`, `file`: durable token storage.

pub mod api;
pub mod auth;
pub mod context;
pub mod errors;
pub mod fetch;
pub mod file;
pub mod health;
pub mod session;
pub mod storage;
pub mod store;
#[cfg(test)]
pub mod test_support;
pub mod users;

pub use api::ApiClient;
pub use context::AppContext;
pub use errors::ClientError;
pub use fetch::{ApiHook, FetchState};
pub use store::UserStore;
