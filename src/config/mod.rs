//! Configuration module for Mailhost-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use mailhost_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawler will start from: {:?}", config.crawler.seeds);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FilterConfig, FrontierOrder, HttpConfig, OutputConfig,
    DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STORE_PATH, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
