//! Email domain harvesting
//!
//! - `extractor`: pulls the domain part out of every email-shaped token in a page
//! - `denylist`: public mail providers whose domains are never recorded
//! - `set`: the run-scoped accumulator that enforces the denylist

mod denylist;
mod extractor;
mod set;

pub use denylist::{Denylist, DEFAULT_PUBLIC_DOMAINS};
pub use extractor::extract_domains;
pub use set::DomainSet;
