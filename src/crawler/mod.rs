//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a bounded timeout
//! - HTML parsing and link extraction
//! - Overall crawl coordination
//! - Interrupt handling

mod coordinator;
mod fetcher;
mod parser;
mod shutdown;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
pub use parser::{is_binary_content_type, parse_html, ParseError, ParsedPage};
pub use shutdown::{InterruptAction, InterruptGuard, FORCED_EXIT_CODE};
