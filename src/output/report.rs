//! Crawl report
//!
//! Summary of a single run, built by the coordinator when the loop stops.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Why the crawl loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No URLs left to fetch
    FrontierExhausted,
    /// The page ceiling was reached
    PageCeiling,
    /// A stop signal was received
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FrontierExhausted => "frontier exhausted",
            Self::PageCeiling => "page ceiling reached",
            Self::Interrupted => "interrupted",
        };
        f.write_str(s)
    }
}

/// Counters and metadata for a finished crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Pages fetched and harvested
    pub pages_ok: u64,

    /// URLs whose fetch failed
    pub fetch_errors: u64,

    /// Pages fetched but not parseable
    pub parse_errors: u64,

    /// Successful fetches, the number compared against the page ceiling
    pub pages_fetched: u64,

    /// URLs admitted to the frontier, seeds included
    pub urls_queued: u64,

    /// Domains added during this run
    pub new_domains: u64,

    /// Domains written to the store
    pub total_domains: u64,

    /// URLs left unprocessed in the frontier
    pub frontier_remaining: u64,

    pub stop_reason: StopReason,

    /// Wall time of the run in seconds
    pub elapsed_secs: f64,

    /// Where the domains were saved
    pub store_location: String,

    /// SHA-256 of the configuration file, when one was used
    pub config_hash: Option<String>,
}

impl CrawlReport {
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs)
    }

    /// Pages per second over the whole run
    pub fn rate(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.pages_fetched as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Summary ===\n");

    println!("Run:");
    println!("  Started: {}", report.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Stopped: {}", report.stop_reason);
    println!("  Duration: {:.2}s", report.elapsed_secs);
    if let Some(hash) = &report.config_hash {
        println!("  Config hash: {}", hash);
    }
    println!();

    println!("Pages:");
    println!("  Visited: {}", report.pages_fetched);
    println!("  Harvested: {}", report.pages_ok);
    println!("  Fetch errors: {}", report.fetch_errors);
    println!("  Parse errors: {}", report.parse_errors);
    println!("  Queued: {}", report.urls_queued);
    println!("  Left in frontier: {}", report.frontier_remaining);
    println!("  Rate: {:.2} pages/sec", report.rate());
    println!();

    println!("Domains:");
    println!("  New this run: {}", report.new_domains);
    println!(
        "  Saved: {} -> {}",
        report.total_domains, report.store_location
    );
}

/// Writes the report as pretty JSON
pub fn write_report_json(report: &CrawlReport, path: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(path, json)
}
