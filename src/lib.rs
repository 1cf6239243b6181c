//! Mailhost-Harvest: a same-host crawler that collects email domains
//!
//! This crate walks a single website from a set of seed URLs, scans every
//! fetched page for email addresses, and keeps a de-duplicated, sorted set of
//! the domains behind them (minus well-known public mail providers) in a JSON
//! file.

pub mod config;
pub mod crawler;
pub mod domains;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Mailhost-Harvest operations
///
/// Only fatal conditions live here. Per-URL failures are recorded as
/// [`state::Outcome`] values and never surface as a `HarvestError`.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Domain store error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Mailhost-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator};
pub use domains::{extract_domains, DomainSet};
pub use output::{CrawlReport, StopReason};
pub use state::{Frontier, Outcome};
pub use storage::{DomainStore, JsonDomainStore};
pub use crate::url::{is_same_origin, is_static_resource, BaseOrigin};
