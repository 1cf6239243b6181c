use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// local-part@domain where the final label is at least two letters
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z0-9._%+-]+@([a-z0-9.-]+\.[a-z]{2,})").expect("email pattern is valid")
});

/// Extracts the distinct domains of all email-shaped tokens in `text`
///
/// The text is lowercased before matching, so the result is always lowercase.
/// Callers pass the full serialized markup, not just the visible text, so
/// addresses inside attributes (e.g. `mailto:` hrefs) are found too.
///
/// # Examples
///
/// ```
/// use mailhost_harvest::domains::extract_domains;
///
/// let found = extract_domains(r#"<a href="mailto:Info@Lab.Example.ORG">write</a> or x@y.io"#);
/// assert_eq!(
///     found.into_iter().collect::<Vec<_>>(),
///     vec!["lab.example.org".to_string(), "y.io".to_string()]
/// );
/// ```
pub fn extract_domains(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    EMAIL_PATTERN
        .captures_iter(&lowered)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
