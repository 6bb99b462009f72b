use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to
/// lowercase. If the URL has no host (which shouldn't happen for valid
/// HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitefold::url::extract_domain;
///
/// let url = Url::parse("https://example.test/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.test".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true iff both URLs share the same network location
///
/// The host is compared case-insensitively, matching standard URL
/// semantics. Ports are compared using the scheme's default when none is
/// spelled out, so `https://a.test` and `https://a.test:443` agree while
/// `https://a.test:8080` does not. Paths play no part here; path
/// comparison (where the crawl scope uses it) is case-sensitive.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitefold::url::same_domain;
///
/// let a = Url::parse("https://example.test/a").unwrap();
/// let b = Url::parse("https://EXAMPLE.test/b").unwrap();
/// let c = Url::parse("https://other.test/a").unwrap();
/// assert!(same_domain(&a, &b));
/// assert!(!same_domain(&a, &c));
/// ```
pub fn same_domain(a: &Url, b: &Url) -> bool {
    let hosts_match = match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => ha.eq_ignore_ascii_case(hb),
        _ => false,
    };

    hosts_match && a.port_or_known_default() == b.port_or_known_default()
}
