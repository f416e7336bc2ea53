//! # Recordkeep Store
//!
//! Storage for items behind the [`EntityStore`] trait.
//!
//! - [`MemoryStore`] keeps everything in a lock-guarded map (tests, benches,
//!   ephemeral runs).
//! - [`JsonFileStore`] persists the table to one JSON file with atomic
//!   temp-file-and-rename writes.
//!
//! ```no_run
//! use recordkeep_store::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let store = JsonFileStore::open("items.json").await?;
//! let saved = store.save(Item::new("Item1", "Desc1", "item1@email.com")).await?;
//! assert_eq!(store.find_by_id(saved.id.unwrap()).await?, Some(saved));
//! # Ok(())
//! # }
//! ```

pub mod json_file;
pub mod memory;
pub mod store;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{EntityStore, SharedStore};

pub mod prelude {
    pub use crate::json_file::JsonFileStore;
    pub use crate::memory::MemoryStore;
    pub use crate::store::{EntityStore, SharedStore};
    pub use recordkeep_core::prelude::*;
}
