//! Storage traits and error types
//!
//! This module defines the trait interface for domain store backends and
//! associated error types.

use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur during domain store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed domain store {path}: {source}")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for domain store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable home of the harvested domain set
///
/// The engine calls `load` once before crawling and `save` once when the
/// crawl stops, so implementations need no locking of their own.
pub trait DomainStore: Send + Sync {
    /// Loads the persisted domains
    ///
    /// A missing backing file yields an empty set. A backing file that exists
    /// but cannot be read or decoded is an error; it must never be treated as
    /// empty, or the next `save` would wipe it.
    fn load(&self) -> StoreResult<BTreeSet<String>>;

    /// Replaces the persisted domains with `domains`
    fn save(&self, domains: &BTreeSet<String>) -> StoreResult<()>;

    /// Human-readable location used in log lines
    fn location(&self) -> String;
}
