//! Per-run collection of successfully processed items.

use parking_lot::Mutex;
use recordkeep_core::prelude::*;

/// Concurrency-safe, append-only result collection for one batch run.
///
/// Tasks append in completion order; each entry carries its dispatch index
/// so [`ResultAccumulator::into_ordered`] can restore dispatch order once
/// the completion barrier has released. Entries are not deduplicated.
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    entries: Mutex<Vec<(usize, Item)>>,
}

impl ResultAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one processed item. Safe to call from any task.
    pub fn append(&self, index: usize, item: Item) {
        self.entries.lock().push((index, item));
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Consume the accumulator, returning entries sorted by dispatch index
    pub fn into_ordered(self) -> Vec<Item> {
        Self::ordered(self.entries.into_inner())
    }

    /// Take every entry through a shared reference, sorted by dispatch index.
    ///
    /// Must only be called after all appending tasks have been joined.
    pub fn take_ordered(&self) -> Vec<Item> {
        Self::ordered(std::mem::take(&mut *self.entries.lock()))
    }

    fn ordered(mut entries: Vec<(usize, Item)>) -> Vec<Item> {
        entries.sort_by_key(|(index, _)| *index);
        entries.into_iter().map(|(_, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn item(id: ItemId) -> Item {
        Item::new(format!("Item{}", id), "", "a@b.io").with_id(id)
    }

    #[test]
    fn test_into_ordered_restores_dispatch_order() {
        let acc = ResultAccumulator::new();
        acc.append(2, item(30));
        acc.append(0, item(10));
        acc.append(1, item(20));

        let ids: Vec<_> = acc.into_ordered().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![Some(10), Some(20), Some(30)]);
    }

    #[test]
    fn test_take_ordered_empties() {
        let acc = ResultAccumulator::new();
        acc.append(1, item(2));
        acc.append(0, item(1));

        assert_eq!(acc.take_ordered()[0].id, Some(1));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_clear() {
        let acc = ResultAccumulator::new();
        acc.append(0, item(1));
        acc.append(1, item(2));
        assert_eq!(acc.len(), 2);
        acc.clear();
        assert!(acc.is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let acc = ResultAccumulator::new();
        acc.append(0, item(1));
        acc.append(0, item(1));
        assert_eq!(acc.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let acc = Arc::new(ResultAccumulator::new());

        let handles: Vec<_> = (0..100)
            .map(|index| {
                let acc = acc.clone();
                tokio::spawn(async move {
                    tokio::task::yield_now().await;
                    acc.append(index, item(index as ItemId + 1));
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let drained = acc.take_ordered();
        assert_eq!(drained.len(), 100);
        assert_eq!(drained[0].id, Some(1));
        assert_eq!(drained[99].id, Some(100));
    }
}
