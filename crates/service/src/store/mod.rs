//! Client-side state containers.

pub mod user_store;

pub use user_store::{UserPatch, UserStore, UserStoreState};
