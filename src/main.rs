//! lt24-dump main entry point
//!
//! This is the command-line interface for dumping LiveTrack24 tracks.

use anyhow::Context;
use clap::Parser;
use lt24_dump::config::{load_config_with_hash, Config, Verbosity, DEFAULT_TRACK_FILE};
use lt24_dump::output::print_summary;
use lt24_dump::run_dump;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// lt24-dump: download every IGC track of a LiveTrack24 account
///
/// Track ids are discovered by crawling the account's track listing (logged
/// in when a password is given) and can be cached in a YAML file so later
/// runs skip the crawl.
#[derive(Parser, Debug)]
#[command(name = "lt24-dump")]
#[command(version)]
#[command(about = "Dump all IGC tracks from LiveTrack24", long_about = None)]
struct Cli {
    /// Account username
    #[arg(short, long)]
    username: Option<String>,

    /// Password; if given, log in before crawling
    #[arg(short, long)]
    password: Option<String>,

    /// Track id cache; read if it exists, written after a crawl
    #[arg(
        short = 'f',
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_TRACK_FILE
    )]
    track_file: Option<PathBuf>,

    /// Output directory [default: tracks]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Verbosity level (trace, debug, info, warning, critical, ... or numeric) [default: warning]
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        num_args = 0..=1,
        default_missing_value = "info"
    )]
    verbose: Option<Verbosity>,

    /// Only report errors
    #[arg(short, long, alias = "silent", conflicts_with = "verbose")]
    quiet: bool,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Server base URL
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Highest listing page to fetch
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Number of concurrent downloads
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,

    /// Disable the download progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbosity = if cli.quiet {
        Verbosity::ERROR
    } else {
        cli.verbose.unwrap_or_default()
    };

    // Setup logging based on verbosity
    setup_logging(verbosity);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if verbosity.is_detailed() {
                eprintln!("Error: {:?}", e);
            } else {
                tracing::error!("{:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbosity: Verbosity) {
    let level = verbosity.level().to_string().to_lowercase();
    let filter = EnvFilter::new(format!("lt24_dump={}", level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(cli)?;
    tracing::debug!("Configuration: {:?}", redacted(&config));

    let summary = run_dump(config).await.context("Track dump failed")?;
    print_summary(&summary);

    Ok(())
}

/// Loads the optional config file and applies command line overrides
fn build_config(cli: Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::debug!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(username) = cli.username {
        config.account.username = username;
    }
    if let Some(password) = cli.password {
        config.account.password = Some(password);
    }
    if let Some(track_file) = cli.track_file {
        config.output.track_file = Some(track_file);
    }
    if let Some(output) = cli.output {
        config.output.output_dir = output;
    }
    if let Some(server) = cli.server {
        config.crawler.server_url = server;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(concurrency) = cli.concurrency {
        config.output.concurrency = concurrency;
    }
    if cli.no_progress || cli.quiet {
        config.output.show_progress = false;
    }

    Ok(config)
}

/// Copy of the config that is safe to log
fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    if config.account.password.is_some() {
        config.account.password = Some("***".to_string());
    }
    config
}
