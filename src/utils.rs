use url::Url;

/// Whether a link already carries an HTTP(S) scheme
pub fn is_absolute_http(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

/// Resolve a link found in markup against the site base URL.
///
/// Absolute HTTP(S) links are parsed as-is; anything else is joined to `base`.
pub fn resolve_url(base: &Url, link: &str) -> Result<Url, url::ParseError> {
    if is_absolute_http(link) {
        Url::parse(link)
    } else {
        base.join(link)
    }
}
