//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Loading the domain store and seeding the frontier
//! - Fetching pages in bounded batches
//! - Harvesting email domains and same-origin links from each page
//! - Stopping on an empty frontier, the page ceiling, or a stop signal
//! - Persisting the domain set exactly once at the end

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
use crate::crawler::parser::parse_html;
use crate::domains::{extract_domains, Denylist, DomainSet};
use crate::output::{CrawlReport, StopReason};
use crate::state::{Admission, Frontier, FrontierEntry, Outcome};
use crate::storage::{DomainStore, JsonDomainStore};
use crate::url::{normalize_url, BaseOrigin};
use crate::{HarvestError, UrlError};
use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Emit a progress line every this many processed URLs
const PROGRESS_INTERVAL: u64 = 10;

/// Per-run counters folded into the final report
#[derive(Debug, Default)]
struct Tally {
    processed: u64,
    pages_ok: u64,
    fetch_errors: u64,
    parse_errors: u64,
    urls_queued: u64,
}

impl Tally {
    /// Successful fetches, which count toward the page ceiling
    fn pages_fetched(&self) -> u64 {
        self.pages_ok + self.parse_errors
    }
}

/// Main crawler coordinator structure
///
/// Owns all mutable crawl state (frontier, visited record, domain set) for
/// one run. Fetches may run concurrently, but their results are applied here
/// one at a time, so there is a single writer for every piece of state.
pub struct Coordinator {
    config: Arc<Config>,
    store: Box<dyn DomainStore>,
    frontier: Frontier,
    domains: DomainSet,
    client: Client,
    stop: Arc<AtomicBool>,
    config_hash: Option<String>,
    seeds_queued: u64,
}

impl Coordinator {
    /// Creates a coordinator backed by the JSON store named in the config
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - Invalid config or unreadable domain store;
    ///   no network activity has happened yet
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let store = JsonDomainStore::new(&config.output.store_path);
        Self::with_store(config, Box::new(store))
    }

    /// Creates a coordinator with an explicit domain store
    pub fn with_store(config: Config, store: Box<dyn DomainStore>) -> Result<Self, HarvestError> {
        validate(&config)?;

        let seeds = config
            .crawler
            .seeds
            .iter()
            .map(|s| normalize_url(s))
            .collect::<Result<Vec<_>, _>>()?;
        let base = seeds
            .first()
            .and_then(BaseOrigin::from_url)
            .ok_or(UrlError::MissingHost)?;

        // Fatal before any fetching: a corrupt store must not be overwritten
        let existing = store.load()?;
        tracing::info!(
            "Loaded {} known domains from {}",
            existing.len(),
            store.location()
        );
        let domains = DomainSet::new(
            existing,
            Denylist::new(config.filter.public_domains.iter().cloned()),
        );

        let mut frontier = Frontier::new(
            base,
            config.crawler.frontier_order,
            config.crawler.max_depth,
        );
        let mut seeds_queued = 0;
        for seed in seeds {
            match frontier.seed(seed.clone()) {
                Admission::Queued => seeds_queued += 1,
                Admission::StaticResource => {
                    tracing::warn!("Ignoring seed {}: static resource", seed)
                }
                other => tracing::debug!("Ignoring seed {}: {:?}", seed, other),
            }
        }

        let client = build_http_client(&config.http)?;

        tracing::info!(
            "Base origin {}, {} seed(s) queued",
            frontier.base_origin(),
            seeds_queued
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            frontier,
            domains,
            client,
            stop: Arc::new(AtomicBool::new(false)),
            config_hash: None,
            seeds_queued,
        })
    }

    /// Attaches the configuration file hash to the report
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Flag that stops the crawl after the in-flight batch when set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn domains(&self) -> &DomainSet {
        &self.domains
    }

    /// Runs the main crawl loop
    ///
    /// Each iteration dequeues up to `max-concurrent-fetches` URLs, never more
    /// than the pages left under the ceiling, fetches them concurrently, and
    /// then processes the results in dequeue order. Per-URL failures are
    /// recorded in the frontier and never abort the run. The domain set is
    /// saved once when the loop stops, whatever the reason.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The run finished and the domains were saved
    /// * `Err(HarvestError)` - The domain store could not be written
    pub async fn run(&mut self) -> Result<CrawlReport, HarvestError> {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let max_pages = self.config.crawler.max_pages;
        let pool_size = self.config.crawler.max_concurrent_fetches.max(1) as u64;

        let mut tally = Tally {
            urls_queued: self.seeds_queued,
            ..Tally::default()
        };

        tracing::info!(
            "Starting crawl: ceiling {} pages, {} concurrent fetch(es)",
            max_pages,
            pool_size
        );

        let stop_reason = loop {
            if self.stop.load(Ordering::SeqCst) {
                tracing::info!("Stop requested, finishing crawl");
                break StopReason::Interrupted;
            }
            if self.frontier.is_empty() {
                tracing::info!("Frontier is empty, crawl complete");
                break StopReason::FrontierExhausted;
            }
            let remaining = max_pages.saturating_sub(tally.pages_fetched());
            if remaining == 0 {
                tracing::info!("Page ceiling of {} reached", max_pages);
                break StopReason::PageCeiling;
            }

            let slots = pool_size.min(remaining) as usize;
            let batch: Vec<FrontierEntry> = std::iter::from_fn(|| self.frontier.pop())
                .take(slots)
                .collect();

            for entry in &batch {
                tracing::info!("Visiting: {} (depth {})", entry.url, entry.depth);
            }

            let client = &self.client;
            let results = join_all(batch.iter().map(|entry| fetch_page(client, &entry.url))).await;

            for (entry, result) in batch.into_iter().zip(results) {
                self.process_result(entry, result, &mut tally);

                if tally.processed % PROGRESS_INTERVAL == 0 {
                    let elapsed = start_time.elapsed();
                    let rate = tally.pages_fetched() as f64 / elapsed.as_secs_f64().max(1e-9);
                    tracing::info!(
                        "Progress: {} pages visited, {} in frontier, {} domains, {:.2} pages/sec",
                        tally.pages_fetched(),
                        self.frontier.len(),
                        self.domains.len(),
                        rate
                    );
                }
            }
        };

        self.store.save(self.domains.as_set())?;

        let elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl finished ({}): {} pages visited in {:?}, {} domains saved to {}",
            stop_reason,
            tally.pages_fetched(),
            elapsed,
            self.domains.len(),
            self.store.location()
        );

        Ok(CrawlReport {
            started_at,
            pages_ok: tally.pages_ok,
            fetch_errors: tally.fetch_errors,
            parse_errors: tally.parse_errors,
            pages_fetched: tally.pages_fetched(),
            urls_queued: tally.urls_queued,
            new_domains: self.domains.added() as u64,
            total_domains: self.domains.len() as u64,
            frontier_remaining: self.frontier.len() as u64,
            stop_reason,
            elapsed_secs: elapsed.as_secs_f64(),
            store_location: self.store.location(),
            config_hash: self.config_hash.clone(),
        })
    }

    /// Applies the result of one fetch to the crawl state
    fn process_result(
        &mut self,
        entry: FrontierEntry,
        result: Result<FetchedPage, FetchError>,
        tally: &mut Tally,
    ) {
        tally.processed += 1;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", entry.url, e);
                self.frontier
                    .resolve(&entry.url, Outcome::fetch_error(e.to_string()));
                tally.fetch_errors += 1;
                return;
            }
        };

        if page.final_url != entry.url.as_str() {
            tracing::debug!(
                "{} redirected to {} (HTTP {})",
                entry.url,
                page.final_url,
                page.status_code
            );
        } else {
            tracing::trace!("{} fetched (HTTP {})", entry.url, page.status_code);
        }

        let parsed = match parse_html(&page.body, page.content_type.as_deref(), &entry.url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", entry.url, e);
                self.frontier
                    .resolve(&entry.url, Outcome::parse_error(e.to_string()));
                tally.parse_errors += 1;
                return;
            }
        };

        self.frontier.resolve(&entry.url, Outcome::Ok);
        tally.pages_ok += 1;

        let found = extract_domains(&parsed.markup);
        for domain in self.domains.extend_from(&found) {
            tracing::info!("New domain: {}", domain);
        }

        let child_depth = entry.depth + 1;
        for link in parsed.links {
            let link_str = link.to_string();
            match self.frontier.offer(link, child_depth) {
                Admission::Queued => {
                    tally.urls_queued += 1;
                    tracing::debug!("Queued: {}", link_str);
                }
                Admission::StaticResource => {
                    tracing::debug!("Skipping static resource: {}", link_str)
                }
                Admission::OffOrigin => tracing::trace!("Skipping off-origin link: {}", link_str),
                Admission::TooDeep => tracing::trace!("Skipping too-deep link: {}", link_str),
                Admission::AlreadyQueued | Admission::AlreadyVisited => {}
            }
        }

        tracing::debug!(
            "{}: {} domain(s) found, frontier size {}",
            entry.url,
            found.len(),
            self.frontier.len()
        );
    }
}

/// Runs the main crawl operation
///
/// Builds a coordinator from the configuration (loading the domain store
/// named there) and runs it to completion.
///
/// # Example
///
/// ```no_run
/// use mailhost_harvest::config::load_config;
/// use mailhost_harvest::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let report = run_crawl(config).await?;
/// println!("{} new domains", report.new_domains);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
