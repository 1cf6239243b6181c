use crate::domains::DEFAULT_PUBLIC_DOMAINS;
use serde::Deserialize;

/// Page ceiling used when none is configured
pub const DEFAULT_MAX_PAGES: u64 = 10_000_000;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default domain store file name
pub const DEFAULT_STORE_PATH: &str = "dominios.json";

/// Desktop browser identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Main configuration structure for Mailhost-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CrawlerConfig {
    /// Seed URLs; the first one defines the base origin
    pub seeds: Vec<String>,

    /// Maximum number of successfully fetched pages per run
    pub max_pages: u64,

    /// Maximum link hops from a seed (unbounded when absent)
    pub max_depth: Option<u32>,

    /// Number of fetches allowed in flight at once
    pub max_concurrent_fetches: usize,

    /// Order in which frontier entries are dequeued
    pub frontier_order: FrontierOrder,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: None,
            max_concurrent_fetches: 1,
            frontier_order: FrontierOrder::default(),
        }
    }
}

/// Dequeue policy for the frontier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontierOrder {
    /// Breadth-first: oldest discovery first
    #[default]
    Fifo,
    /// Depth-first: newest discovery first
    Lifo,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    /// Bounded wait for a single request, in seconds
    pub request_timeout_secs: u64,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    /// Path to the JSON domain store
    pub store_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            store_path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

/// Domain filtering configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FilterConfig {
    /// Public email providers that are never recorded
    pub public_domains: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            public_domains: DEFAULT_PUBLIC_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}
