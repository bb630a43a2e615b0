//! Configuration module for Site-Mirror
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and merging command line values over them.
//!
//! # Example
//!
//! ```no_run
//! use site_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mirror.toml")).unwrap();
//! println!("Mirror will use max depth: {}", config.mirror.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CliOverrides, Config, HttpConfig, MirrorConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config, read_config};
pub use validation::validate;
