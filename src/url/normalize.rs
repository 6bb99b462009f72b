use crate::UrlError;
use url::Url;

/// Normalizes a URL according to Sitefold's normalization rules
///
/// Two URLs that differ only by trivial spelling must normalize to the same
/// identifier, because the frontier compares normalized URLs when deciding
/// whether a page has already been seen.
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Validate scheme: only http and https are crawlable
/// 3. Require a host (the url crate lowercases it during parsing)
/// 4. Normalize path: empty path becomes `/`, trailing slash removed
///    (except for the root `/`)
/// 5. Remove fragment (everything after `#`)
/// 6. Sort query parameters alphabetically; remove an empty query string
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use sitefold::url::normalize_url;
///
/// let url = normalize_url("https://example.test/docs/#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.test/docs");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize(url)
}

/// Resolves a possibly-relative reference against a base URL
///
/// Joins `href` against `base` per standard URL-resolution rules and then
/// applies the same normalization as [`normalize_url`]. An unparsable href
/// yields `UrlError::Malformed`; callers are expected to skip the single
/// link rather than abort.
///
/// # Arguments
///
/// * `base` - The URL of the page the reference was found on
/// * `href` - The reference, relative or absolute
///
/// # Examples
///
/// ```
/// use sitefold::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.test/a/b").unwrap();
/// let resolved = resolve(&base, "../c").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.test/c");
/// ```
pub fn resolve(base: &Url, href: &str) -> Result<Url, UrlError> {
    let joined = base
        .join(href)
        .map_err(|e| UrlError::Malformed(format!("{}: {}", href, e)))?;
    normalize(joined)
}

/// Applies the normalization steps to an already-parsed URL
fn normalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.set_fragment(None);

    if url.query().is_some() {
        let params = sorted_query_params(&url);

        if params.is_empty() {
            url.set_query(None);
        } else {
            let query_string = params
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        k.clone()
                    } else {
                        format!("{}={}", k, v)
                    }
                })
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query_string));
        }
    }

    Ok(url)
}

/// Normalizes a URL path: collapses an empty path to `/` and trims the
/// trailing slash everywhere except the root
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    if path.len() > 1 && path.ends_with('/') {
        path[..path.len() - 1].to_string()
    } else {
        path.to_string()
    }
}

/// Returns the query parameters sorted by key
fn sorted_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    params.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    params
}
