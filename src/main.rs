//! fedifeed: fetch recent posts from a social platform and print them as
//! JSON.
//!
//! ```text
//! fedifeed mastodon https://example.social/api/v1/timelines/public \
//!     --max-count 10 --cache-dir ~/.cache/fedifeed
//! ```
//!
//! Settings come from an optional TOML file (`--config`, see
//! `fedifeed::config`) and are overridden by flags.  Logs go to stderr and
//! honour `RUST_LOG`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fedifeed::config::Config;
use fedifeed::{registry, FeedManager};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Platform name, e.g. "mastodon".
    platform: String,

    /// API endpoint returning a list of posts.
    endpoint: String,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of posts to return.
    #[arg(short = 'n', long)]
    max_count: Option<usize>,

    /// Seconds a cached response stays valid (0 disables caching).
    #[arg(long)]
    cache_delay: Option<u64>,

    /// Directory for cached responses.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Bearer token for the platform API.
    #[arg(long, env = "FEDIFEED_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // -- configuration: file first, flags on top ----------------------------
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(token) = cli.access_token {
        config.auth.access_token = Some(token);
    }

    let mut options = config.fetch.to_options();
    if let Some(n) = cli.max_count {
        options.max_count = n;
    }
    if let Some(secs) = cli.cache_delay {
        options.cache_delay = Duration::from_secs(secs);
    }
    if let Some(dir) = cli.cache_dir {
        options.cache_dir = dir;
    }

    // -- fetch ----------------------------------------------------------------
    let mut manager = FeedManager::new(&cli.platform, &config.auth);
    match manager.fetch_posts(&cli.endpoint, &options, &config.auth) {
        Ok(posts) => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &posts)?;
            writeln!(stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            error!(platform = %cli.platform, "{}", manager.error());
            if !manager.has_handler() {
                error!(available = ?registry::registered_platforms(), "unknown platform");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
