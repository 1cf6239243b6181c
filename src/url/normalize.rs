use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a page URL into the form used as a frontier/visited key
///
/// The URL must be absolute http(s) with a host. Any fragment is dropped, so
/// two URLs that differ only after `#` produce the same key.
///
/// # Examples
///
/// ```
/// use mailhost_harvest::url::normalize_url;
///
/// let a = normalize_url("http://ex.test/page#top").unwrap();
/// let b = normalize_url("http://ex.test/page").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "http://ex.test/page");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    strip_fragment(&mut url);
    Ok(url)
}

/// Removes the fragment component in place
pub fn strip_fragment(url: &mut Url) {
    url.set_fragment(None);
}

/// Resolves an anchor href against the page it was found on
///
/// Standard base-URL resolution is applied and the fragment is stripped.
/// Returns `None` for hrefs that cannot name a fetchable page:
/// - empty or fragment-only hrefs
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
/// - hrefs that fail to resolve or resolve to a non-HTTP(S) URL
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    strip_fragment(&mut resolved);
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("http://ex.test/docs/intro.html").unwrap()
    }

    #[test]
    fn test_normalize_strips_fragment() {
        let url = normalize_url("https://example.com/a/b#section-2").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a/b");
    }

    #[test]
    fn test_normalize_keeps_query() {
        let url = normalize_url("https://example.com/search?q=1#x").unwrap();
        assert_eq!(url.as_str(), "https://example.com/search?q=1");
    }

    #[test]
    fn test_normalize_rejects_non_http() {
        assert!(matches!(
            normalize_url("ftp://example.com/"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(normalize_url("relative"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_resolve_relative_links() {
        assert_eq!(
            resolve_link(&page(), "/a").unwrap().as_str(),
            "http://ex.test/a"
        );
        assert_eq!(
            resolve_link(&page(), "setup.html").unwrap().as_str(),
            "http://ex.test/docs/setup.html"
        );
        assert_eq!(
            resolve_link(&page(), "../index.html#top").unwrap().as_str(),
            "http://ex.test/index.html"
        );
    }

    #[test]
    fn test_resolve_absolute_link_keeps_other_hosts() {
        let resolved = resolve_link(&page(), "https://other.test/x").unwrap();
        assert_eq!(resolved.as_str(), "https://other.test/x");
    }

    #[test]
    fn test_resolve_skips_non_page_links() {
        assert!(resolve_link(&page(), "").is_none());
        assert!(resolve_link(&page(), "   ").is_none());
        assert!(resolve_link(&page(), "#top").is_none());
        assert!(resolve_link(&page(), "mailto:a@b.test").is_none());
        assert!(resolve_link(&page(), "JavaScript:void(0)").is_none());
        assert!(resolve_link(&page(), "tel:+15551234").is_none());
        assert!(resolve_link(&page(), "data:text/html,hi").is_none());
        assert!(resolve_link(&page(), "ftp://ex.test/file").is_none());
    }
}
