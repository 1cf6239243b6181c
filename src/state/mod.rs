//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState` / `Outcome`: where a URL is in its lifecycle and how it ended
//! - `Frontier`: the queue of URLs still to fetch plus the record of every URL
//!   already claimed, guaranteeing each URL is fetched at most once per run

mod frontier;
mod page_state;

// Re-export main types
pub use frontier::{Admission, Frontier, FrontierEntry};
pub use page_state::{Outcome, PageState};
