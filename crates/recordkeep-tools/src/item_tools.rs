//! CRUD operations over stored items

use recordkeep_core::prelude::*;
use recordkeep_store::{EntityStore, SharedStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub status: Option<ItemStatus>,
}

impl ItemChanges {
    /// Whether nothing would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.email.is_none()
            && self.status.is_none()
    }

    fn apply(self, mut item: Item) -> Item {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(email) = self.email {
            item.email = email;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        item
    }
}

/// Item service context
#[derive(Clone)]
pub struct ItemTools {
    pub store: SharedStore,
    validator: Arc<CompositeValidator>,
}

impl ItemTools {
    /// Create item tools with the standard item validators
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            validator: Arc::new(CompositeValidator::for_items()),
        }
    }

    /// All stored items in id order
    pub async fn list(&self) -> Result<Vec<Item>> {
        self.store.find_all().await
    }

    /// Fetch one item
    pub async fn get(&self, id: ItemId) -> Result<Item> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("item {}", id)))
    }

    /// Validate and store a new item. Any id on the input is ignored.
    pub async fn create(&self, item: Item) -> Result<Item> {
        Ok(self.create_with_notes(item).await?.0)
    }

    /// Like [`ItemTools::create`], also returning informational validation
    /// notes such as an empty description
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create_with_notes(&self, mut item: Item) -> Result<(Item, Vec<String>)> {
        item.id = None;
        let notes = self.check(&item)?;

        let saved = self.store.save(item).await?;
        log::info!("Created {}", saved.key());
        Ok((saved, notes))
    }

    /// Replace an existing item, keeping the given id
    #[instrument(skip(self, item))]
    pub async fn update(&self, id: ItemId, item: Item) -> Result<Item> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(Error::not_found(format!("item {}", id)));
        }

        let item = item.with_id(id);
        self.check(&item)?;

        let saved = self.store.save(item).await?;
        log::info!("Updated {}", saved.key());
        Ok(saved)
    }

    /// Apply a partial update to an existing item
    pub async fn update_fields(&self, id: ItemId, changes: ItemChanges) -> Result<Item> {
        let current = self.get(id).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        self.update(id, changes.apply(current)).await
    }

    /// Remove an item
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ItemId) -> Result<()> {
        if !self.store.delete_by_id(id).await? {
            return Err(Error::not_found(format!("item {}", id)));
        }
        log::info!("Deleted item {}", id);
        Ok(())
    }

    /// Create `count` sample items named after their sequence number
    pub async fn seed(&self, count: usize) -> Result<Vec<Item>> {
        let start = self.store.count().await?;
        let mut created = Vec::with_capacity(count);
        for n in start + 1..=start + count {
            created.push(
                self.create(Item::new(
                    format!("Item{}", n),
                    format!("Desc{}", n),
                    format!("item{}@email.com", n),
                ))
                .await?,
            );
        }
        Ok(created)
    }

    /// Run validation, returning informational issues as strings
    pub fn check(&self, item: &Item) -> Result<Vec<String>> {
        let report = self.validator.validate(item);
        let notes = report
            .issues
            .iter()
            .filter(|issue| !issue.severity.is_failure())
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect();
        report.into_result()?;
        Ok(notes)
    }
}

impl std::fmt::Debug for ItemTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemTools")
            .field("validator", &self.validator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordkeep_store::MemoryStore;

    fn tools() -> ItemTools {
        ItemTools::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_ignores_supplied_id() {
        let tools = tools();
        let created = tools
            .create(Item::new("Item1", "Desc1", "item1@email.com").with_id(77))
            .await
            .unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(created.status, ItemStatus::New);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_email() {
        let tools = tools();
        let err = tools
            .create(Item::new("Item1", "Desc1", "not-an-email"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ValidationError { .. }));
        assert!(err.to_string().contains("email"));
        assert!(tools.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_notes_reports_info_issues() {
        let tools = tools();
        let (created, notes) = tools
            .create_with_notes(Item::new("Item1", "", "item1@email.com"))
            .await
            .unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(notes, vec!["description: Description is empty".to_string()]);

        let (_, none) = tools
            .create_with_notes(Item::new("Item2", "Desc2", "item2@email.com"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        assert!(tools().get(5).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_keeps_path_id() {
        let tools = tools();
        tools
            .create(Item::new("Item1", "Desc1", "item1@email.com"))
            .await
            .unwrap();

        let updated = tools
            .update(1, Item::new("Renamed", "Desc1", "item1@email.com").with_id(42))
            .await
            .unwrap();
        assert_eq!(updated.id, Some(1));
        assert_eq!(tools.get(1).await.unwrap().name, "Renamed");
        assert!(tools.get(42).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let err = tools()
            .update(3, Item::new("x", "y", "x@y.io"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_fields_merges() {
        let tools = tools();
        tools
            .create(Item::new("Item1", "Desc1", "item1@email.com"))
            .await
            .unwrap();

        let changes = ItemChanges {
            email: Some("new@email.com".into()),
            status: Some(ItemStatus::Other("ARCHIVED".into())),
            ..Default::default()
        };
        let updated = tools.update_fields(1, changes).await.unwrap();

        assert_eq!(updated.name, "Item1");
        assert_eq!(updated.email, "new@email.com");
        assert_eq!(updated.status.as_str(), "ARCHIVED");
    }

    #[tokio::test]
    async fn test_delete() {
        let tools = tools();
        tools
            .create(Item::new("Item1", "Desc1", "item1@email.com"))
            .await
            .unwrap();

        tools.delete(1).await.unwrap();
        assert!(tools.delete(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_seed_continues_numbering() {
        let tools = tools();
        tools.seed(2).await.unwrap();
        let more = tools.seed(3).await.unwrap();

        assert_eq!(more.len(), 3);
        assert_eq!(more[0].name, "Item3");
        assert_eq!(tools.list().await.unwrap().len(), 5);
    }

    #[test]
    fn test_check_reports_informational_notes() {
        let notes = tools()
            .check(&Item::new("Item1", "", "item1@email.com"))
            .unwrap();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].starts_with("description"));
    }
}
