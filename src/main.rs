//! Mailhost-Harvest main entry point
//!
//! This is the command-line interface for the Mailhost-Harvest crawler.

use anyhow::Context;
use clap::Parser;
use mailhost_harvest::config::{load_config_with_hash, validate, Config};
use mailhost_harvest::crawler::{Coordinator, InterruptGuard};
use mailhost_harvest::output::{print_report, write_report_json};
use mailhost_harvest::storage::{open_store, DomainStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Mailhost-Harvest: collect email domains from a website
///
/// Crawls every same-origin page reachable from the seed URLs, extracts the
/// domains of email addresses found in the markup, and merges them (minus
/// public mail providers) into a sorted JSON file.
#[derive(Parser, Debug)]
#[command(name = "mailhost-harvest")]
#[command(version)]
#[command(about = "Collect email domains from a website", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL; repeat to add more. Replaces the seeds from the config file
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// Maximum number of pages to visit
    #[arg(long, value_name = "N")]
    max_pages: Option<u64>,

    /// Path of the JSON domain store
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Number of pages fetched concurrently
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Also write the crawl report as JSON to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show the domains in the store and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if !self.seeds.is_empty() {
            config.crawler.seeds = self.seeds.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(store) = &self.store {
            config.output.store_path = store.display().to_string();
        }
        if let Some(concurrency) = self.concurrency {
            config.crawler.max_concurrent_fetches = concurrency;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };
    cli.apply_overrides(&mut config);

    if cli.stats {
        return handle_stats(&config);
    }

    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, config_hash, cli.report.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mailhost_harvest=info,warn"),
            1 => EnvFilter::new("mailhost_harvest=debug,info"),
            2 => EnvFilter::new("mailhost_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Mailhost-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    match config.crawler.max_depth {
        Some(depth) => println!("  Max depth: {}", depth),
        None => println!("  Max depth: unbounded"),
    }
    println!(
        "  Concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Frontier order: {:?}", config.crawler.frontier_order);

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.request_timeout_secs);
    println!("  User agent: {}", config.http.user_agent);

    println!("\nOutput:");
    println!("  Domain store: {}", config.output.store_path);

    println!(
        "\nPublic Domains Filtered ({}):",
        config.filter.public_domains.len()
    );
    for domain in &config.filter.public_domains {
        println!("  - {}", domain);
    }

    println!("\nSeeds ({}):", config.crawler.seeds.len());
    for seed in &config.crawler.seeds {
        println!("  * {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: lists the domains already in the store
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = open_store(Path::new(&config.output.store_path));
    let domains = store
        .load()
        .with_context(|| format!("failed to read {}", store.location()))?;

    println!("Domain store: {}\n", store.location());
    println!("Domains ({}):", domains.len());
    for domain in &domains {
        println!("  - {}", domain);
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    config_hash: Option<String>,
    report_path: Option<&Path>,
) -> anyhow::Result<()> {
    tracing::info!("Total seed URLs: {}", config.crawler.seeds.len());

    let mut coordinator = Coordinator::new(config).context("failed to start crawl")?;
    if let Some(hash) = config_hash {
        coordinator = coordinator.with_config_hash(hash);
    }

    tokio::spawn(InterruptGuard::new(coordinator.stop_handle()).watch_ctrl_c());

    let report = coordinator.run().await.context("crawl failed")?;
    print_report(&report);

    if let Some(path) = report_path {
        write_report_json(&report, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    Ok(())
}
