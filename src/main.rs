//! Site-Mirror main entry point
//!
//! This is the command-line interface for the Site-Mirror website mirroring engine.

use clap::Parser;
use site_mirror::config::{read_config, validate, CliOverrides, Config};
use site_mirror::crawler::mirror;
use site_mirror::output::{generate_markdown_summary, print_statistics, CrawlStatistics};
use site_mirror::url::LinkStyle;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Mirror: a recursive website mirroring engine
///
/// Site-Mirror downloads a page, rewrites its links to point at local
/// copies, stores the resources it references, and follows same-site page
/// links down to a bounded depth.
#[derive(Parser, Debug)]
#[command(name = "site-mirror")]
#[command(version)]
#[command(about = "A recursive website mirroring engine", long_about = None)]
struct Cli {
    /// URL to start mirroring from
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Directory the mirror is written into [default: .]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Maximum crawl depth; 1 mirrors only the start page [default: 1]
    #[arg(short, long, value_name = "N")]
    depth: Option<u32>,

    /// Optional TOML configuration file; command line values take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How rewritten links are expressed: page-relative or output-root
    #[arg(long, value_name = "STYLE")]
    link_style: Option<LinkStyle>,

    /// Write a markdown summary of the crawl to this file
    #[arg(long, value_name = "FILE", conflicts_with = "dry_run")]
    summary: Option<PathBuf>,

    /// Validate the configuration and show what would be mirrored without fetching
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_mirror(&config, cli.summary.as_deref()).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mirror=info,warn"),
            1 => EnvFilter::new("site_mirror=debug,info"),
            2 => EnvFilter::new("site_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies command line values and validates
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            read_config(path)?
        }
        None => Config::default(),
    };

    config.apply_overrides(CliOverrides {
        start_url: cli.url.clone(),
        output_dir: cli.output.clone(),
        max_depth: cli.depth,
        link_style: cli.link_style,
    });

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be mirrored
fn handle_dry_run(config: &Config) {
    println!("=== Site-Mirror Dry Run ===\n");

    println!("Mirror:");
    println!(
        "  Start URL: {}",
        config.mirror.start_url.as_deref().unwrap_or_default()
    );
    println!("  Output directory: {}", config.mirror.output_dir.display());
    println!("  Max depth: {}", config.mirror.max_depth);
    println!("  Link style: {}", config.mirror.link_style);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!("  Max redirects: {}", config.http.max_redirects);

    println!("\n✓ Configuration is valid");
    if config.mirror.max_depth == 0 {
        println!("✓ Max depth is 0, nothing would be fetched");
    } else {
        println!("✓ Would mirror pages under the start URL down to depth {}", config.mirror.max_depth);
    }
}

/// Handles the main mirror operation
async fn handle_mirror(
    config: &Config,
    summary_path: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = match mirror(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Mirror failed: {}", e);
            return Err(e.into());
        }
    };

    print_statistics(&CrawlStatistics::from_report(&report));

    if let Some(path) = summary_path {
        tracing::info!("Generating markdown summary...");
        generate_markdown_summary(&report, path)?;
        println!("✓ Summary written to: {}", path.display());
    }

    Ok(())
}
