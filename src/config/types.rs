use crate::url::LinkStyle;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Site-Mirror
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mirror: MirrorConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// What to mirror and where to put it
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorConfig {
    /// URL the crawl starts from; also the prefix page links must share
    #[serde(rename = "start-url", default)]
    pub start_url: Option<String>,

    /// Root directory of the mirror
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Recursion depth; 1 fetches only the start page (plus its resources)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// How rewritten links are expressed in saved pages
    #[serde(rename = "link-style", default)]
    pub link_style: LinkStyle,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total timeout per request (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum redirect hops followed per request
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

/// Values given on the command line, applied over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub start_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub max_depth: Option<u32>,
    pub link_style: Option<LinkStyle>,
}

impl Config {
    /// Applies command line values on top of this configuration
    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(start_url) = overrides.start_url {
            self.mirror.start_url = Some(start_url);
        }
        if let Some(output_dir) = overrides.output_dir {
            self.mirror.output_dir = output_dir;
        }
        if let Some(max_depth) = overrides.max_depth {
            self.mirror.max_depth = max_depth;
        }
        if let Some(link_style) = overrides.link_style {
            self.mirror.link_style = link_style;
        }
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            start_url: None,
            output_dir: default_output_dir(),
            max_depth: default_max_depth(),
            link_style: LinkStyle::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_depth() -> u32 {
    1
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mirror.start_url, None);
        assert_eq!(config.mirror.output_dir, PathBuf::from("."));
        assert_eq!(config.mirror.max_depth, 1);
        assert_eq!(config.mirror.link_style, LinkStyle::PageRelative);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.max_redirects, 10);
        assert!(config.http.user_agent.starts_with("site-mirror/"));
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let mut config = Config::default();
        config.mirror.max_depth = 4;

        config.apply_overrides(CliOverrides {
            start_url: Some("https://example.com/".to_string()),
            output_dir: Some(PathBuf::from("/tmp/mirror")),
            ..Default::default()
        });

        assert_eq!(config.mirror.start_url.as_deref(), Some("https://example.com/"));
        assert_eq!(config.mirror.output_dir, PathBuf::from("/tmp/mirror"));
        assert_eq!(config.mirror.max_depth, 4);
        assert_eq!(config.mirror.link_style, LinkStyle::PageRelative);
    }
}
