use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::ClientError;

/// JSON file-backed key-value map.
///
/// The whole map is rewritten on every mutation: small maps only. Writes go
/// to a sibling temp file first and are renamed into place.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, creating parent directories and an empty
    /// file when missing. A corrupt file is treated as empty.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ClientError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "unreadable store file, starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(storage_err(e)),
        };

        let store = Arc::new(Self { inner: RwLock::new(map), file_path });
        store.save().await?;
        Ok(store)
    }

    async fn save(&self) -> Result<(), ClientError> {
        let data = {
            let map = self.inner.read().await;
            serde_json::to_vec(&*map).map_err(storage_err)?
        };
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data).await.map_err(storage_err)?;
        fs::rename(&tmp, &self.file_path).await.map_err(storage_err)?;
        Ok(())
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Insert or replace, then persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ClientError> {
        self.inner.write().await.insert(key, value);
        self.save().await
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ClientError> {
        let existed = self.inner.write().await.remove(key).is_some();
        if existed {
            self.save().await?;
        }
        Ok(existed)
    }
}

fn storage_err(e: impl std::fmt::Display) -> ClientError {
    ClientError::Storage(e.to_string())
}
