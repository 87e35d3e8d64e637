//! Quote-Scout main entry point
//!
//! This is the command-line interface for the Quote-Scout quotation harvester.

use clap::Parser;
use quote_scout::config::{load_config_with_hash, Config};
use quote_scout::crawler::{CrawlEngine, HttpFetcher};
use quote_scout::storage::{open_storage, store_enriched, store_quotes, QuoteStore, RunStatus};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Hash recorded for runs that used the built-in defaults
const DEFAULT_CONFIG_HASH: &str = "defaults";

/// Quote-Scout: a polite quotation harvester
///
/// Quote-Scout walks every listing page of a quotes site, following the
/// "next" link until there is none, and archives the quotes it finds.
#[derive(Parser, Debug)]
#[command(name = "quote-scout")]
#[command(version)]
#[command(about = "A polite quotation harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults target quotes.toscrape.com)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Look up birth date and place for every quote's author
    #[arg(long)]
    enrich: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Print quotes to stdout instead of storing them in the database
    #[arg(long)]
    no_store: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => load_config_with_hash(path)?,
        None => (Config::default(), DEFAULT_CONFIG_HASH.to_string()),
    };

    setup_logging(cli.verbose, cli.quiet, config.logging.file.as_deref())?;

    match &cli.config {
        Some(path) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            config_hash
        ),
        None => tracing::info!("No configuration file given, using defaults"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, &config_hash, cli.enrich, cli.no_store).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// When `log_file` is set, output is appended to it instead of stderr.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&str>) -> std::io::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_scout=info,warn"),
            1 => EnvFilter::new("quote_scout=debug,info"),
            2 => EnvFilter::new("quote_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.init(),
    }

    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Quote-Scout Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Start path: {}", config.site.start_path);

    println!("\nCrawler:");
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    match config.crawler.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }
    println!("  User agent: {}", config.user_agent.value);

    println!("\nSelectors:");
    for (field, selector) in config.selectors.fields() {
        println!("  {}: {}", field, selector);
    }

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    if let Some(file) = &config.logging.file {
        println!("  Log file: {}", file);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    config_hash: &str,
    enrich: bool,
    no_store: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::new(config)?;
    let engine = CrawlEngine::new(config, fetcher)?;

    tracing::info!("Starting crawl at {}", engine.base_url());
    let report = engine.crawl_with_report().await;

    if !report.is_complete() {
        tracing::warn!("Crawl stopped early: {:?}", report.stop);
    }

    let enriched = if enrich {
        tracing::info!("Looking up author details for {} quotes", report.quotes.len());
        Some(engine.enrich_quotes(&report.quotes).await)
    } else {
        None
    };

    if no_store {
        match &enriched {
            Some(quotes) => {
                for item in quotes {
                    println!(
                        "{} - {} (born {}, {})",
                        item.quote.text,
                        item.quote.author,
                        item.author.birth_date.as_deref().unwrap_or("unknown"),
                        item.author.birth_place.as_deref().unwrap_or("unknown")
                    );
                }
            }
            None => {
                for quote in &report.quotes {
                    println!("{} - {}", quote.text, quote.author);
                }
            }
        }
        return Ok(());
    }

    let mut storage = open_storage(Path::new(&config.output.database_path))?;
    let run_id = storage.create_run(config_hash)?;

    match &enriched {
        Some(quotes) => store_enriched(&mut storage, run_id, quotes)?,
        None => store_quotes(&mut storage, run_id, &report.quotes)?,
    }

    let status = if report.is_complete() {
        RunStatus::Completed
    } else {
        RunStatus::Partial
    };
    storage.finish_run(run_id, status, report.quotes.len())?;

    println!(
        "✓ Stored {} quotes from {} pages in {} (run {})",
        report.quotes.len(),
        report.pages_fetched,
        config.output.database_path,
        run_id
    );

    Ok(())
}
