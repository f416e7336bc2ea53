//! Entity store persisted to a single JSON file.
//!
//! The whole table lives in memory; every mutation writes a fresh snapshot to
//! a temp file and renames it over the previous one. A failed write leaves
//! both the file and the in-memory table untouched.

use crate::memory::StoreState;
use crate::store::EntityStore;
use async_trait::async_trait;
use recordkeep_core::prelude::*;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::instrument;

/// JSON-file backed entity store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileStore {
    /// Open (or lazily create) a store file.
    ///
    /// A missing file yields an empty store; the file is created on the first
    /// write.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut state = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => StoreState::default(),
            Ok(content) => serde_json::from_str::<StoreState>(&content).map_err(|e| {
                Error::store_error(format!("Corrupt store file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Store file {} not found, starting empty", path.display());
                StoreState::default()
            }
            Err(e) => return Err(Error::io(e)),
        };
        state.repair_sequence();

        log::debug!(
            "Opened store {} with {} items",
            path.display(),
            state.items.len()
        );

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a snapshot atomically
    async fn persist(&self, state: &StoreState) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }

        let json = serde_json::to_vec_pretty(state)?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(Error::io)?;
        file.write_all(&json).await.map_err(Error::io)?;
        // contents must be durable before the rename publishes them
        file.sync_all().await.map_err(Error::io)?;
        drop(file);

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(Error::io)?;

        Ok(())
    }

    /// Apply a mutation to a copy of the table, persist it, then publish it.
    async fn mutate<T>(&self, f: impl FnOnce(&mut StoreState) -> Result<T> + Send) -> Result<T> {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.persist(&next).await.map_err(|e| {
            Error::store_error(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl EntityStore for JsonFileStore {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    #[instrument(skip(self, item), fields(id = ?item.id), name = "json_store_save")]
    async fn save(&self, item: Item) -> Result<Item> {
        self.mutate(|state| state.upsert(item)).await
    }

    async fn find_all_ids(&self) -> Result<Vec<ItemId>> {
        Ok(self.state.read().await.ids())
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        Ok(self.state.read().await.items.values().cloned().collect())
    }

    #[instrument(skip(self), name = "json_store_delete")]
    async fn delete_by_id(&self, id: ItemId) -> Result<bool> {
        if !self.state.read().await.items.contains_key(&id) {
            return Ok(false);
        }
        self.mutate(|state| Ok(state.remove(id))).await
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.state.read().await.items.len())
    }
}
