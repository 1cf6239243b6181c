use url::Url;

/// File extensions that are never fetched as pages
pub const STATIC_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "jpg", "jpeg", "png", "gif", "bmp", "mp3",
    "mp4", "zip", "rar", "7z", "tar", "gz", "csv",
];

/// Returns true if the URL path ends in a binary, media or archive extension
///
/// Only the path component is inspected, case-insensitively; query strings
/// and fragments do not count. A URL that does not parse is not considered
/// static.
///
/// # Examples
///
/// ```
/// use mailhost_harvest::url::is_static_resource;
///
/// assert!(is_static_resource("https://example.com/files/Report.PDF"));
/// assert!(!is_static_resource("https://example.com/report.pdf.html"));
/// assert!(!is_static_resource("https://example.com/view?file=a.zip"));
/// ```
pub fn is_static_resource(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => path_is_static(parsed.path()),
        Err(_) => false,
    }
}

fn path_is_static(path: &str) -> bool {
    let path = path.to_lowercase();
    STATIC_EXTENSIONS.iter().any(|ext| {
        path.strip_suffix(ext)
            .map_or(false, |rest| rest.ends_with('.'))
    })
}
