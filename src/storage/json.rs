//! JSON file implementation of the domain store
//!
//! The file holds a single pretty-printed JSON array of domain strings,
//! sorted ascending. Writes go to a sibling temporary file first and are then
//! renamed over the target, so a crash mid-write never truncates the store.

use crate::storage::traits::{DomainStore, StoreError, StoreResult};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Domain store backed by a JSON array file
#[derive(Debug, Clone)]
pub struct JsonDomainStore {
    path: PathBuf,
}

impl JsonDomainStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Serializes the domains exactly as they are written to disk
pub fn to_json(domains: &BTreeSet<String>) -> StoreResult<String> {
    let sorted: Vec<&String> = domains.iter().collect();
    Ok(serde_json::to_string_pretty(&sorted)?)
}

impl DomainStore for JsonDomainStore {
    fn load(&self) -> StoreResult<BTreeSet<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    "No domain store at {}, starting empty",
                    self.path.display()
                );
                return Ok(BTreeSet::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let domains: Vec<String> =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: self.path.display().to_string(),
                source,
            })?;

        Ok(domains.into_iter().collect())
    }

    fn save(&self, domains: &BTreeSet<String>) -> StoreResult<()> {
        let json = to_json(domains)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                tracing::warn!("Failed to remove {}: {}", temp.display(), cleanup);
            }
            return Err(self.io_error(e));
        }

        tracing::debug!(
            "Saved {} domains to {}",
            domains.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
