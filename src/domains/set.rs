use crate::domains::Denylist;
use std::collections::BTreeSet;

/// Run-scoped accumulator of harvested domains
///
/// Seeded from the domain store at start, grown as pages are scanned, and
/// written back in full at the end. Never holds a denylisted domain: entries
/// already in the store that are on the denylist are dropped on construction.
#[derive(Debug, Clone)]
pub struct DomainSet {
    domains: BTreeSet<String>,
    denylist: Denylist,
    added: usize,
}

impl DomainSet {
    /// Builds the set from previously persisted domains
    pub fn new(existing: BTreeSet<String>, denylist: Denylist) -> Self {
        let before = existing.len();
        let domains: BTreeSet<String> = existing
            .into_iter()
            .filter(|d| !denylist.contains(d))
            .collect();

        let dropped = before - domains.len();
        if dropped > 0 {
            tracing::warn!(
                "Dropped {} denylisted domain(s) from the loaded store",
                dropped
            );
        }

        Self {
            domains,
            denylist,
            added: 0,
        }
    }

    /// Adds a domain unless it is denylisted or already known
    ///
    /// Returns true if the domain was newly added.
    pub fn insert(&mut self, domain: &str) -> bool {
        if self.denylist.contains(domain) || self.domains.contains(domain) {
            return false;
        }
        self.domains.insert(domain.to_string());
        self.added += 1;
        true
    }

    /// Adds every domain from `found`, returning the ones that were new
    pub fn extend_from<'a, I>(&mut self, found: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        found
            .into_iter()
            .filter(|d| self.insert(d))
            .cloned()
            .collect()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Number of domains added since construction
    pub fn added(&self) -> usize {
        self.added
    }

    /// The domains in ascending order
    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.domains
    }
}
