use crate::url::LinkKind;
use url::Url;

/// Resolves a link reference against the URL of the page it appears on
///
/// Returns None if the reference should not be treated as a link:
/// - fragment-only references (`#section`)
/// - references that fail to parse or resolve
/// - references resolving to a non-HTTP(S) scheme (mailto:, javascript:, data:, ...)
///
/// No normalization beyond what resolution itself performs is applied, so
/// `/a` and `/a/` stay distinct.
///
/// # Examples
///
/// ```
/// use site_mirror::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/index.html").unwrap();
/// let resolved = resolve(&base, "guide.html").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/docs/guide.html");
/// assert!(resolve(&base, "#top").is_none());
/// ```
pub fn resolve(base_url: &Url, reference: &str) -> Option<Url> {
    if reference.starts_with('#') {
        return None;
    }

    let absolute_url = base_url.join(reference).ok()?;

    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url),
        _ => None,
    }
}

/// Classifies an absolute URL as a page or a resource
///
/// A URL is a page if its path ends in `/`, has no extension, or has a
/// `.html`/`.htm` extension (any case). Everything else is a resource.
pub fn classify(url: &Url) -> LinkKind {
    match extension(url.path()) {
        None => LinkKind::Page,
        Some(ext) if ext.eq_ignore_ascii_case(".html") || ext.eq_ignore_ascii_case(".htm") => {
            LinkKind::Page
        }
        Some(_) => LinkKind::Resource,
    }
}

/// Returns true if the final path segment carries an extension
pub fn has_extension(path: &str) -> bool {
    extension(path).is_some()
}

/// Extension of the final path segment, including the leading dot
///
/// A trailing `/` means the final segment is empty, so there is no extension.
fn extension(path: &str) -> Option<&str> {
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    last_segment.rfind('.').map(|dot| &last_segment[dot..])
}

/// Same-site test used to decide whether a page link is followed
///
/// This is a literal string-prefix comparison against the start URL as it
/// was configured, not a host comparison. A start URL of
/// `http://example.com` therefore also admits `http://example.com.evil.net/`.
pub fn is_same_site(start_url: &str, candidate: &str) -> bool {
    candidate.starts_with(start_url)
}
