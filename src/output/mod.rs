//! Output module for reporting crawl results
//!
//! The harvested domains themselves are persisted by the storage module; this
//! module covers the run summary shown to the operator.

mod report;

pub use report::{print_report, write_report_json, CrawlReport, StopReason};
