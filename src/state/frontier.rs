//! Frontier and visited tracking
//!
//! The frontier owns every URL the engine has heard of. Keys are URLs with
//! the fragment stripped, so `page#a` and `page#b` are one entry. A URL is
//! admitted at most once; after it is dequeued it is never queued again,
//! whatever its outcome.

use crate::config::FrontierOrder;
use crate::state::{Outcome, PageState};
use crate::url::{is_static_resource, strip_fragment, BaseOrigin};
use std::collections::{HashMap, VecDeque};
use url::Url;

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch (fragment already stripped)
    pub url: Url,

    /// Link hops from the nearest seed at first discovery
    pub depth: u32,
}

/// Result of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Newly queued
    Queued,
    /// Already waiting in the frontier
    AlreadyQueued,
    /// Already dequeued in this run
    AlreadyVisited,
    /// Path has a static-resource extension
    StaticResource,
    /// Scheme, host or port differs from the base origin
    OffOrigin,
    /// Would exceed the configured depth limit
    TooDeep,
}

#[derive(Debug, Clone)]
enum Slot {
    Queued,
    Fetching,
    Resolved(Outcome),
}

/// Frontier queue plus visited record for a single run
#[derive(Debug)]
pub struct Frontier {
    base: BaseOrigin,
    order: FrontierOrder,
    max_depth: Option<u32>,
    queue: VecDeque<FrontierEntry>,
    slots: HashMap<String, Slot>,
}

impl Frontier {
    pub fn new(base: BaseOrigin, order: FrontierOrder, max_depth: Option<u32>) -> Self {
        Self {
            base,
            order,
            max_depth,
            queue: VecDeque::new(),
            slots: HashMap::new(),
        }
    }

    pub fn base_origin(&self) -> &BaseOrigin {
        &self.base
    }

    /// Queues a seed URL at depth 0
    ///
    /// Seeds skip the origin check (any seed may be on another host) but are
    /// still subject to the static-resource and duplicate checks.
    pub fn seed(&mut self, mut url: Url) -> Admission {
        strip_fragment(&mut url);
        if is_static_resource(url.as_str()) {
            return Admission::StaticResource;
        }
        self.admit(url, 0)
    }

    /// Offers a link discovered on a page at `depth`
    pub fn offer(&mut self, mut url: Url, depth: u32) -> Admission {
        strip_fragment(&mut url);

        match self.state(url.as_str()) {
            PageState::Queued => return Admission::AlreadyQueued,
            state if state.is_visited() => return Admission::AlreadyVisited,
            _ => {}
        }

        if !self.base.contains(&url) {
            return Admission::OffOrigin;
        }

        if is_static_resource(url.as_str()) {
            return Admission::StaticResource;
        }

        if self.max_depth.map_or(false, |max| depth > max) {
            return Admission::TooDeep;
        }

        self.admit(url, depth)
    }

    fn admit(&mut self, url: Url, depth: u32) -> Admission {
        match self.slots.get(url.as_str()) {
            Some(Slot::Queued) => Admission::AlreadyQueued,
            Some(_) => Admission::AlreadyVisited,
            None => {
                self.slots.insert(url.as_str().to_string(), Slot::Queued);
                self.queue.push_back(FrontierEntry { url, depth });
                Admission::Queued
            }
        }
    }

    /// Dequeues the next entry and marks it as being fetched
    ///
    /// FIFO yields breadth-first traversal, LIFO depth-first.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = match self.order {
            FrontierOrder::Fifo => self.queue.pop_front(),
            FrontierOrder::Lifo => self.queue.pop_back(),
        }?;
        self.slots
            .insert(entry.url.as_str().to_string(), Slot::Fetching);
        Some(entry)
    }

    /// Records the outcome of a dequeued URL
    ///
    /// Only a URL in the `Fetching` state can be resolved, and only once.
    /// Returns false (leaving the record untouched) otherwise.
    pub fn resolve(&mut self, url: &Url, outcome: Outcome) -> bool {
        match self.slots.get_mut(url.as_str()) {
            Some(slot) if matches!(slot, Slot::Fetching) => {
                *slot = Slot::Resolved(outcome);
                true
            }
            _ => false,
        }
    }

    /// Current lifecycle state of a URL
    pub fn state(&self, url: &str) -> PageState {
        match self.slots.get(url) {
            None => PageState::Unseen,
            Some(Slot::Queued) => PageState::Queued,
            Some(Slot::Fetching) => PageState::Fetching,
            Some(Slot::Resolved(outcome)) => outcome.state(),
        }
    }

    /// Outcome of a resolved URL
    pub fn outcome(&self, url: &str) -> Option<&Outcome> {
        match self.slots.get(url) {
            Some(Slot::Resolved(outcome)) => Some(outcome),
            _ => None,
        }
    }

    /// Iterates over every resolved URL and its outcome
    pub fn resolved(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.slots.iter().filter_map(|(url, slot)| match slot {
            Slot::Resolved(outcome) => Some((url.as_str(), outcome)),
            _ => None,
        })
    }

    /// Number of URLs still waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
