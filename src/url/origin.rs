use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// The `scheme://host[:port]` boundary of a crawl
///
/// Derived once from the first seed and never changed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseOrigin(String);

impl BaseOrigin {
    /// Derives the origin from an already parsed URL
    ///
    /// Returns `None` for URLs without a host (e.g. `data:` or `file:` URLs).
    pub fn from_url(url: &Url) -> Option<Self> {
        origin_string(url).map(Self)
    }

    /// Derives the origin from a seed URL string
    ///
    /// # Examples
    ///
    /// ```
    /// use mailhost_harvest::url::BaseOrigin;
    ///
    /// let origin = BaseOrigin::from_seed("https://dlmf.nist.gov/5.2#E1").unwrap();
    /// assert_eq!(origin.as_str(), "https://dlmf.nist.gov");
    ///
    /// let origin = BaseOrigin::from_seed("http://127.0.0.1:8080/").unwrap();
    /// assert_eq!(origin.as_str(), "http://127.0.0.1:8080");
    /// ```
    pub fn from_seed(seed: &str) -> UrlResult<Self> {
        let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;
        Self::from_url(&url).ok_or(UrlError::MissingHost)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the parsed URL shares this origin
    pub fn contains(&self, url: &Url) -> bool {
        origin_string(url).map_or(false, |origin| origin == self.0)
    }
}

impl fmt::Display for BaseOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if `url` has exactly the scheme, host and port of `base`
///
/// The comparison is a plain string equality against the precomputed origin.
/// Anything that fails to parse is rejected.
pub fn is_same_origin(url: &str, base: &BaseOrigin) -> bool {
    match Url::parse(url) {
        Ok(parsed) => base.contains(&parsed),
        Err(_) => false,
    }
}

fn origin_string(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}
