//! # Recordkeep Tools
//!
//! The operations a front end (the CLI today) calls into.
//!
//! ## Tool Categories
//!
//! ### Item Tools
//!
//! [`item_tools::ItemTools`] - CRUD over stored items:
//! - List and fetch items
//! - Create and update with validation (required name, well-formed email)
//! - Delete
//! - Seed sample data
//!
//! ### Batch Tools
//!
//! [`batch_tools::BatchTools`] - Runs the concurrent processor over every
//! stored item and returns the processed items or a full report.
//!
//! ### Responses
//!
//! [`response::StandardResponse`] wraps every result in one envelope and
//! [`output_formatter::ResponseFormatter`] renders it as JSON, a human
//! layout, or plain text.
//!
//! ## Example
//!
//! ```no_run
//! use recordkeep_tools::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let store: SharedStore = Arc::new(JsonFileStore::open("items.json").await?);
//! let items = ItemTools::new(store.clone());
//! items.create(Item::new("Item1", "Desc1", "item1@email.com")).await?;
//!
//! let batch = BatchTools::new(store, &AppConfig::default());
//! let processed = batch.process_all().await;
//! let json = StandardResponse::new("items.json", "process_all", &processed)
//!     .with_count(processed.len())
//!     .to_json()?;
//! println!("{}", ResponseFormatter::format(&json, OutputFormat::Human));
//! # Ok(())
//! # }
//! ```

pub mod batch_tools;
pub mod item_tools;
pub mod output_formatter;
pub mod response;

pub use batch_tools::BatchTools;
pub use item_tools::{ItemChanges, ItemTools};
pub use output_formatter::{OutputFormat, ResponseFormatter};
pub use response::{StandardResponse, error_response};

pub mod prelude {
    pub use crate::batch_tools::BatchTools;
    pub use crate::item_tools::{ItemChanges, ItemTools};
    pub use crate::output_formatter::{OutputFormat, ResponseFormatter};
    pub use crate::response::{StandardResponse, error_response};
    pub use recordkeep_batch::prelude::*;
}
