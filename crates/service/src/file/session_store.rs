use std::{path::PathBuf, sync::Arc};

use crate::errors::ClientError;
use crate::session::SessionStorage;
use crate::storage::json_map_store::JsonMapStore;

/// Session storage persisted as a JSON object on disk.
#[derive(Clone)]
pub struct FileSessionStore {
    store: Arc<JsonMapStore<String, String>>,
}

impl FileSessionStore {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ClientError> {
        let store = JsonMapStore::<String, String>::open(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn from_config(cfg: &configs::SessionConfig) -> Result<Arc<Self>, ClientError> {
        Self::open(&cfg.path).await
    }
}

#[async_trait::async_trait]
impl SessionStorage for FileSessionStore {
    async fn get_item(&self, key: &str) -> Option<String> { self.store.get(&key.to_string()).await }
    async fn set_item(&self, key: &str, value: String) -> Result<(), ClientError> { self.store.insert(key.to_string(), value).await }
    async fn remove_item(&self, key: &str) -> Result<bool, ClientError> { self.store.remove(&key.to_string()).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn session_survives_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("session_{}.json", Uuid::new_v4()));
        let storage = FileSessionStore::open(&tmp).await?;
        assert_eq!(storage.get_item("token").await, None);

        storage.set_item("token", "abc".into()).await?;
        let reopened = FileSessionStore::open(&tmp).await?;
        assert_eq!(reopened.get_item("token").await.as_deref(), Some("abc"));

        assert!(reopened.remove_item("token").await?);
        let again = FileSessionStore::open(&tmp).await?;
        assert_eq!(again.get_item("token").await, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
