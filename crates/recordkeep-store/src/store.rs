//! The entity store interface consumed by the batch core and item service.

use async_trait::async_trait;
use recordkeep_core::prelude::*;
use std::sync::Arc;

/// Keyed storage for items.
///
/// Implementations serialize conflicting writes to the same record
/// internally; callers never lock rows themselves.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Look up one item. `Ok(None)` when no item has this id.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>>;

    /// Upsert an item and return the persisted form.
    ///
    /// Items without an id are assigned a fresh one.
    async fn save(&self, item: Item) -> Result<Item>;

    /// Snapshot of every stored id, ascending.
    async fn find_all_ids(&self) -> Result<Vec<ItemId>>;

    /// Every stored item, ascending by id.
    async fn find_all(&self) -> Result<Vec<Item>>;

    /// Remove an item. Returns whether it existed.
    async fn delete_by_id(&self, id: ItemId) -> Result<bool>;

    /// Number of stored items
    async fn count(&self) -> Result<usize> {
        Ok(self.find_all_ids().await?.len())
    }
}

/// Shared, dynamically dispatched store handle
pub type SharedStore = Arc<dyn EntityStore>;

