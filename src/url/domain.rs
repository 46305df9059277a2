use url::Url;

/// Extracts the network authority (lowercase host and explicit port) of a URL
///
/// A port equal to the scheme's default is dropped by the parser, so
/// `https://example.com/` and `https://example.com:443/` share an authority, and
/// the scheme itself plays no part: `http://` and `https://` links to the same
/// host are the same site.
///
/// # Returns
///
/// * `Some((String, Option<u16>))` - The lowercase host and non-default port
/// * `None` - If the URL has no host (`mailto:`, `javascript:`, `data:` ...)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use menu_scout::url::extract_authority;
///
/// let url = Url::parse("https://EXAMPLE.COM/menu").unwrap();
/// assert_eq!(extract_authority(&url), Some(("example.com".to_string(), None)));
///
/// let url = Url::parse("mailto:chef@example.com").unwrap();
/// assert_eq!(extract_authority(&url), None);
/// ```
pub fn extract_authority(url: &Url) -> Option<(String, Option<u16>)> {
    url.host_str()
        .map(|h| (h.to_lowercase(), url.port()))
}

/// Returns true when both URLs resolve to the same network authority
///
/// Hosts must match exactly; `www.example.com` and `example.com` are different.
pub fn same_authority(a: &Url, b: &Url) -> bool {
    match (extract_authority(a), extract_authority(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
