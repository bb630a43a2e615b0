/// Outcome definitions for URLs handled during a crawl
use std::fmt;

/// How processing of one URL ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    // ===== Success States =====
    /// Page was parsed, rewritten and written; resource was written verbatim
    Saved,

    /// Page could not be read as HTML and was written as fetched
    SavedRaw,

    // ===== Error States =====
    /// Server answered with a non-2xx status
    HttpStatus(u16),

    /// Request never produced a response (connection, TLS, timeout, body read)
    Unreachable,

    /// Content was fetched but could not be written
    WriteFailed,
}

impl Outcome {
    /// Returns true if something was written for this URL
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved | Self::SavedRaw)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Short label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::SavedRaw => "saved_raw",
            Self::HttpStatus(_) => "http_status",
            Self::Unreachable => "unreachable",
            Self::WriteFailed => "write_failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpStatus(code) => write!(f, "http_status({})", code),
            other => write!(f, "{}", other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(Outcome::Saved.is_success());
        assert!(Outcome::SavedRaw.is_success());

        assert!(!Outcome::HttpStatus(404).is_success());
        assert!(!Outcome::Unreachable.is_success());
        assert!(!Outcome::WriteFailed.is_success());
    }

    #[test]
    fn test_is_error() {
        assert!(Outcome::HttpStatus(500).is_error());
        assert!(Outcome::Unreachable.is_error());
        assert!(Outcome::WriteFailed.is_error());

        assert!(!Outcome::Saved.is_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Outcome::Saved), "saved");
        assert_eq!(format!("{}", Outcome::SavedRaw), "saved_raw");
        assert_eq!(format!("{}", Outcome::HttpStatus(404)), "http_status(404)");
        assert_eq!(format!("{}", Outcome::WriteFailed), "write_failed");
    }
}
