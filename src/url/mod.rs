//! URL handling module for Site-Mirror
//!
//! This module resolves link references against the page they appear on,
//! classifies the result as a page or a resource, and maps URLs onto the
//! local mirror layout.

mod local_path;
mod resolve;

// Re-export main functions
pub use local_path::{local_path, relative_href, relative_to_output};
pub use resolve::{classify, has_extension, is_same_site, resolve};

/// What a resolved link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// An HTML document: rewritten and possibly followed
    Page,
    /// Any other payload: stored byte for byte
    Resource,
}

impl LinkKind {
    /// Returns true if the link should be crawled as a page
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page)
    }

    /// Short label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Resource => "resource",
        }
    }
}

/// How rewritten links are expressed in saved pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStyle {
    /// Relative to the directory of the page that holds the link
    #[default]
    PageRelative,
    /// Relative to the output directory root
    OutputRoot,
}

impl std::str::FromStr for LinkStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page-relative" => Ok(Self::PageRelative),
            "output-root" => Ok(Self::OutputRoot),
            other => Err(format!(
                "unknown link style '{}' (expected 'page-relative' or 'output-root')",
                other
            )),
        }
    }
}

impl std::fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageRelative => write!(f, "page-relative"),
            Self::OutputRoot => write!(f, "output-root"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_kind_is_page() {
        assert!(LinkKind::Page.is_page());
        assert!(!LinkKind::Resource.is_page());
    }

    #[test]
    fn test_link_style_from_str() {
        assert_eq!(
            "page-relative".parse::<LinkStyle>(),
            Ok(LinkStyle::PageRelative)
        );
        assert_eq!("output-root".parse::<LinkStyle>(), Ok(LinkStyle::OutputRoot));
        assert!("absolute".parse::<LinkStyle>().is_err());
    }

    #[test]
    fn test_link_style_display_round_trips() {
        for style in [LinkStyle::PageRelative, LinkStyle::OutputRoot] {
            assert_eq!(style.to_string().parse::<LinkStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_default_link_style() {
        assert_eq!(LinkStyle::default(), LinkStyle::PageRelative);
    }
}
