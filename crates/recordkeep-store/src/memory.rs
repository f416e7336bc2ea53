//! In-memory entity store

use crate::store::EntityStore;
use async_trait::async_trait;
use recordkeep_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::instrument;

/// Table contents plus the id sequence.
///
/// Also the on-disk snapshot format of [`crate::JsonFileStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    pub(crate) next_id: ItemId,
    #[serde(with = "items_as_list")]
    pub(crate) items: BTreeMap<ItemId, Item>,
}

impl StoreState {
    pub(crate) fn upsert(&mut self, mut item: Item) -> Result<Item> {
        let id = match item.id {
            Some(id) => id,
            None => self.allocate_id()?,
        };
        // keep the sequence ahead of explicitly chosen ids; it parks at MAX
        // once the top id is taken so the next allocation fails
        self.next_id = self.next_id.max(id.checked_add(1).unwrap_or(ItemId::MAX));
        item.id = Some(id);
        self.items.insert(id, item.clone());
        Ok(item)
    }

    /// First free id at or after the sequence position
    fn allocate_id(&mut self) -> Result<ItemId> {
        let mut id = self.next_id.max(1);
        while self.items.contains_key(&id) {
            id = id
                .checked_add(1)
                .ok_or_else(|| Error::store_error("Item id sequence exhausted"))?;
        }
        Ok(id)
    }

    /// Move the sequence past every stored id.
    ///
    /// Snapshots written by hand or by older builds may carry a stale
    /// `next_id`.
    pub(crate) fn repair_sequence(&mut self) {
        let floor = self
            .items
            .last_key_value()
            .map(|(&id, _)| id.checked_add(1).unwrap_or(ItemId::MAX))
            .unwrap_or(1);
        if self.next_id < floor {
            log::warn!(
                "Stored id sequence {} is behind the stored items, advancing to {}",
                self.next_id,
                floor
            );
            self.next_id = floor;
        }
    }

    pub(crate) fn remove(&mut self, id: ItemId) -> bool {
        self.items.remove(&id).is_some()
    }

    pub(crate) fn ids(&self) -> Vec<ItemId> {
        self.items.keys().copied().collect()
    }
}

/// Snapshot files store items as a JSON array rather than an id-keyed map.
mod items_as_list {
    use super::{Item, ItemId};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        items: &BTreeMap<ItemId, Item>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(items.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<ItemId, Item>, D::Error> {
        let list = Vec::<Item>::deserialize(deserializer)?;
        list.into_iter()
            .map(|item| match item.id {
                Some(id) => Ok((id, item)),
                None => Err(serde::de::Error::custom(format!(
                    "stored item '{}' has no id",
                    item.name
                ))),
            })
            .collect()
    }
}

/// Entity store kept entirely in memory.
///
/// Writes are serialized by a single `RwLock`; reads run concurrently.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with items (ids assigned where missing)
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let mut state = StoreState::default();
        for item in items {
            state.upsert(item)?;
        }
        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    #[instrument(skip(self, item), fields(id = ?item.id), name = "memory_store_save")]
    async fn save(&self, item: Item) -> Result<Item> {
        let saved = self.state.write().await.upsert(item)?;
        log::debug!("Saved {}", saved.key());
        Ok(saved)
    }

    async fn find_all_ids(&self) -> Result<Vec<ItemId>> {
        Ok(self.state.read().await.ids())
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        Ok(self.state.read().await.items.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<bool> {
        Ok(self.state.write().await.remove(id))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.state.read().await.items.len())
    }
}
