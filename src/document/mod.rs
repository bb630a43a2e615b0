//! HTML document handling for mirrored pages
//!
//! This module turns fetched page bytes into a mutable document tree, offers
//! every link-bearing attribute to a visitor in document order, and renders
//! the tree back to HTML once the links have been rewritten.

mod charset;
mod rewrite;

pub use charset::{charset_from_content_type, charset_from_meta};
pub use rewrite::{rewrite_links, DiscoveredLink, LinkRewriter};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use scraper::{Html, Node, Selector};

/// Attributes whose values are treated as link references
pub const LINK_ATTRIBUTES: [&str; 2] = ["href", "src"];

/// Result of trying to read fetched bytes as HTML
#[derive(Debug)]
pub enum ParsedDocument {
    /// The bytes were parsed into a document tree
    Parsed(Document),
    /// The bytes are not HTML and are kept untouched
    Unparsed(Vec<u8>),
}

impl ParsedDocument {
    /// Parses fetched bytes into a document
    ///
    /// `content_type` is the response's Content-Type header, if it had one.
    /// A type other than HTML yields [`ParsedDocument::Unparsed`]. HTML is
    /// decoded with the charset from the header, else from a `<meta>`
    /// declaration, else as UTF-8, falling back to windows-1252 for bytes
    /// that are not UTF-8. The HTML parser recovers from any malformed
    /// markup, so every HTML body becomes a document.
    ///
    /// Without a Content-Type, bytes with no declared charset that are not
    /// UTF-8 are taken to be binary and come back unparsed.
    pub fn parse(bytes: Vec<u8>, content_type: Option<&str>) -> Self {
        if content_type.is_some_and(|ct| !is_html_content_type(ct)) {
            return Self::Unparsed(bytes);
        }

        let declared = content_type
            .and_then(charset_from_content_type)
            .or_else(|| charset_from_meta(&bytes));

        let encoding = match declared {
            Some(encoding) => encoding,
            None if std::str::from_utf8(&bytes).is_ok() => UTF_8,
            None if content_type.is_some() => WINDOWS_1252,
            None => return Self::Unparsed(bytes),
        };

        // A byte order mark overrides the declared encoding.
        let (text, encoding, _) = encoding.decode(&bytes);
        Self::Parsed(Document::parse_with_encoding(&text, encoding))
    }
}

/// A link-bearing attribute offered to a visitor
#[derive(Debug, Clone, Copy)]
pub struct LinkAttribute<'a> {
    /// Local name of the element holding the attribute (`a`, `img`, ...)
    pub element: &'a str,
    /// Attribute name, one of [`LINK_ATTRIBUTES`]
    pub attribute: &'a str,
    /// Attribute value as found in the document
    pub value: &'a str,
}

/// A parsed HTML document
///
/// The tree is an arena of nodes addressed by id, so walking it needs no
/// recursion and rewriting an attribute never touches the tree's shape.
#[derive(Debug)]
pub struct Document {
    html: Html,
    encoding: &'static Encoding,
}

impl Document {
    /// Parses HTML text into a document tree serialized back as UTF-8
    pub fn parse(text: &str) -> Self {
        Self::parse_with_encoding(text, UTF_8)
    }

    /// Parses HTML text that was decoded from `encoding`
    ///
    /// [`Document::serialize`] encodes back to the same encoding, so the
    /// page's own charset declaration stays truthful.
    pub fn parse_with_encoding(text: &str, encoding: &'static Encoding) -> Self {
        Self {
            html: Html::parse_document(text),
            encoding,
        }
    }

    /// Encoding the document is serialized in
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Offers every `href` and `src` attribute to `visitor`, in document order
    ///
    /// Elements are visited depth-first, pre-order, children in sibling
    /// order. When the visitor returns `Some(value)` the attribute is
    /// replaced in place. Element ids are collected before any attribute is
    /// touched, so the visit sequence does not depend on the rewrites.
    ///
    /// Returns the number of candidate attributes seen.
    pub fn visit_link_attributes<F>(&mut self, mut visitor: F) -> usize
    where
        F: FnMut(&LinkAttribute<'_>) -> Option<String>,
    {
        let element_ids: Vec<_> = self
            .html
            .tree
            .root()
            .descendants()
            .filter(|node| node.value().is_element())
            .map(|node| node.id())
            .collect();

        let mut candidates = 0;

        for id in element_ids {
            let Some(mut node) = self.html.tree.get_mut(id) else {
                continue;
            };
            let Node::Element(element) = node.value() else {
                continue;
            };

            let element_name = element.name.local.to_string();

            for (name, value) in element.attrs.iter_mut() {
                if !LINK_ATTRIBUTES.contains(&&*name.local) {
                    continue;
                }
                candidates += 1;

                let link = LinkAttribute {
                    element: &element_name,
                    attribute: &*name.local,
                    value: &**value,
                };

                if let Some(replacement) = visitor(&link) {
                    *value = replacement.into();
                }
            }
        }

        candidates
    }

    /// Returns the page title (from the `<title>` tag), if any
    pub fn title(&self) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;

        self.html
            .select(&title_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Renders the (possibly rewritten) tree back to HTML bytes
    ///
    /// Characters the document's encoding cannot represent are written as
    /// numeric character references.
    pub fn serialize(&self) -> Vec<u8> {
        let html = self.html.html();
        let (bytes, _, _) = self.encoding.encode(&html);
        bytes.into_owned()
    }
}

/// Returns true if a Content-Type header value names an HTML document
///
/// Parameters such as `; charset=utf-8` are ignored.
pub fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}
