//! Durable, process-spanning key-value storage for session data.
//!
//! Plays the role browser `localStorage` plays for a web client: string keys,
//! string values, survives restarts.

use async_trait::async_trait;

use crate::errors::ClientError;

#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Option<String>;
    async fn set_item(&self, key: &str, value: String) -> Result<(), ClientError>;
    /// Returns whether the key was present.
    async fn remove_item(&self, key: &str) -> Result<bool, ClientError>;
}

/// In-memory storage for tests and doc examples.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemorySessionStorage {
        items: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl SessionStorage for MemorySessionStorage {
        async fn get_item(&self, key: &str) -> Option<String> {
            self.items.lock().unwrap_or_else(|p| p.into_inner()).get(key).cloned()
        }

        async fn set_item(&self, key: &str, value: String) -> Result<(), ClientError> {
            self.items.lock().unwrap_or_else(|p| p.into_inner()).insert(key.to_string(), value);
            Ok(())
        }

        async fn remove_item(&self, key: &str) -> Result<bool, ClientError> {
            Ok(self.items.lock().unwrap_or_else(|p| p.into_inner()).remove(key).is_some())
        }
    }
}
