//! URL normalization.

/// True if `url` already starts with `http://` or `https://`.
///
/// Matching is case-sensitive: `HTTP://example.com` gets a second scheme
/// prepended and fails at fetch time, same as any other malformed input.
pub fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Normalize URL by adding https:// if no scheme is present.
///
/// No parsing or DNS lookup happens here; malformed input passes through and
/// is reported when the fetch fails.
pub fn normalize_url(url: &str) -> String {
    if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
