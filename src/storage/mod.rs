//! Storage module for persisting harvested domains
//!
//! The crawl loads the domain set once at start and rewrites it in full at
//! the end. `DomainStore` is the seam; `JsonDomainStore` is the file format
//! the CLI uses.

mod json;
mod traits;

pub use json::{to_json, JsonDomainStore};
pub use traits::{DomainStore, StoreError, StoreResult};

use std::path::Path;

/// Opens the JSON domain store at `path`
pub fn open_store(path: &Path) -> JsonDomainStore {
    JsonDomainStore::new(path)
}
