//! wiki-lexicon main entry point
//!
//! This is the command-line interface for the wiki-lexicon word profiler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wiki_lexicon::config::{load_config_with_hash, Config};
use wiki_lexicon::output::{print_profile, profile_to_json};
use wiki_lexicon::service::{ProfileRequest, ProfileService};

/// wiki-lexicon: word-frequency profiles of encyclopedia topics
///
/// Crawls articles depth-first from a start article, counts the words of
/// every visited article and reports counts and percentage frequencies,
/// optionally without ignored words and below a percentile cutoff.
#[derive(Parser, Debug)]
#[command(name = "wiki-lexicon")]
#[command(version)]
#[command(about = "Word-frequency profiles from an encyclopedia link graph", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run the HTTP API instead of a one-shot profile
    #[arg(long, conflicts_with_all = ["dry_run", "article"])]
    serve: bool,

    /// Validate config and show the effective settings without crawling
    #[arg(long, conflicts_with_all = ["serve", "article"])]
    dry_run: bool,

    /// Title of the article to start from
    #[arg(short, long, required_unless_present_any = ["serve", "dry_run"])]
    article: Option<String>,

    /// Link hops to follow from the start article
    #[arg(short, long, default_value_t = 0)]
    depth: u32,

    /// Word to exclude from the profile (repeatable)
    #[arg(short, long = "ignore", value_name = "WORD")]
    ignore: Vec<String>,

    /// Drop words whose count is below this percentile (0 disables)
    #[arg(short, long, default_value_t = 0)]
    percentile: u32,

    /// Number of rows to print
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Print the full profile as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let service = ProfileService::from_config(&config)?;

    if cli.serve {
        wiki_lexicon::api::serve(&config.server, Arc::new(service)).await?;
    } else {
        handle_profile(&cli, &service).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_lexicon=info,warn"),
            1 => EnvFilter::new("wiki_lexicon=debug,info"),
            2 => EnvFilter::new("wiki_lexicon=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== wiki-lexicon Dry Run ===\n");

    println!("Source:");
    println!("  API URL: {}", config.source.api_url);
    println!("  Request timeout: {}s", config.source.request_timeout_secs);
    println!("  Connect timeout: {}s", config.source.connect_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nTraversal:");
    match config.traversal.max_depth {
        0 => println!("  Max depth: unlimited"),
        n => println!("  Max depth: {}", n),
    }
    match config.traversal.max_articles {
        0 => println!("  Max articles: unlimited"),
        n => println!("  Max articles: {}", n),
    }

    println!("\nServer:");
    println!("  Bind: {}:{}", config.server.host, config.server.port);

    println!("\n✓ Configuration is valid");
}

/// Handles a one-shot profile; Ctrl-C stops the crawl at the next fetch
async fn handle_profile<S, E>(cli: &Cli, service: &ProfileService<S, E>) -> anyhow::Result<()>
where
    S: wiki_lexicon::ArticleSource,
    E: wiki_lexicon::ContentExtractor,
{
    let article = cli
        .article
        .as_deref()
        .context("--article is required for a one-shot profile")?;
    let request = ProfileRequest::new(article, cli.depth, &cli.ignore, cli.percentile)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping after the current article");
            on_interrupt.cancel();
        }
    });

    let profile = service.profile(&request, &cancel).await?;

    if cli.json {
        println!("{}", profile_to_json(&profile)?);
    } else {
        print_profile(request.article.as_str(), &profile, cli.top);
    }

    Ok(())
}
