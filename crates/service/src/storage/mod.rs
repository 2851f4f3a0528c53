//! File-backed storage primitives.
//!
//! Durable key-value persistence for client state that must outlive the
//! process, such as the session token.

pub mod json_map_store;
