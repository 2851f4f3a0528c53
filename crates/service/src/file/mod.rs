//! File-backed implementations of the storage traits.

pub mod session_store;

pub use session_store::FileSessionStore;
