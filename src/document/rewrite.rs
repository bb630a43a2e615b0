//! Link rewriting for mirrored pages

use crate::document::Document;
use crate::url::{classify, local_path, relative_href, relative_to_output, resolve, LinkKind, LinkStyle};
use std::path::Path;
use url::Url;

/// A link found in a page, after resolution and rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    /// Attribute the link was found in (`href` or `src`)
    pub attribute: String,

    /// Attribute value before rewriting
    pub raw_value: String,

    /// Absolute URL the value resolved to
    pub url: Url,

    /// Whether the target is a page or a resource
    pub kind: LinkKind,

    /// Attribute value after rewriting
    pub rewritten: String,
}

/// Everything needed to rewrite the links of one page
#[derive(Debug, Clone, Copy)]
pub struct LinkRewriter<'a> {
    /// URL references are resolved against (the post-redirect page URL)
    pub base_url: &'a Url,

    /// Where the page itself is written
    pub page_path: &'a Path,

    /// Root of the mirror
    pub output_dir: &'a Path,

    /// How rewritten hrefs are expressed
    pub style: LinkStyle,
}

impl LinkRewriter<'_> {
    /// Computes the local href for a resolved URL
    pub fn href_for(&self, url: &Url) -> String {
        let target = local_path(url, self.output_dir);
        match self.style {
            LinkStyle::OutputRoot => relative_to_output(&target, self.output_dir),
            LinkStyle::PageRelative => relative_href(self.page_path, &target),
        }
    }
}

/// Resolves, classifies and rewrites every link in `document`
///
/// Each `href`/`src` value that resolves to an HTTP(S) URL is replaced with
/// the local path of its target. Fragment-only and unresolvable references
/// are left exactly as they were and are not reported.
///
/// # Returns
///
/// The discovered links in document order, duplicates included.
pub fn rewrite_links(document: &mut Document, rewriter: &LinkRewriter<'_>) -> Vec<DiscoveredLink> {
    let mut discovered = Vec::new();

    document.visit_link_attributes(|link| {
        let Some(url) = resolve(rewriter.base_url, link.value) else {
            tracing::trace!("Leaving {}=\"{}\" untouched", link.attribute, link.value);
            return None;
        };

        let rewritten = rewriter.href_for(&url);

        discovered.push(DiscoveredLink {
            attribute: link.attribute.to_string(),
            raw_value: link.value.to_string(),
            kind: classify(&url),
            url,
            rewritten: rewritten.clone(),
        });

        Some(rewritten)
    });

    discovered
}
