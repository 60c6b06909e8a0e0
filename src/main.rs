//! rustmedai - Medical-like AI paper picker
//!
//! Lists medical-like AI papers accepted at the given conferences and years.
//!
//! ## Usage
//!
//! ```bash
//! rustmedai acl 2019
//! rustmedai acl naacl 2018 2019 --markdown
//! rustmedai icml 2020 --all --csv icml2020.csv
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rustmedai::{
    classify::Classifier,
    fetch::{FetchConfig, HttpFetcher, USER_AGENT},
    render::{save_csv, RenderMode},
    report::{self, ReportOptions},
    runner::QueryRunner,
    source::SourceAdapters,
    venues::VenueRegistry,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Pick up medical-like AI paper titles and URLs from conferences and years.
///
/// Conference names are case insensitive.
#[derive(Parser)]
#[command(name = "rustmedai")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Conferences and years, e.g. `acl 2019`, `acl naacl 2018 2019`
    #[arg(required = true, value_name = "CONFERENCES_AND_YEARS")]
    conferences_and_years: Vec<String>,

    /// Be more quiet: summaries only
    #[arg(short, long)]
    quiet: bool,

    /// Copy the result to the clipboard
    #[arg(long)]
    copy: bool,

    /// Also list non-medical papers
    #[arg(short, long)]
    all: bool,

    /// Output as Markdown links (honours --url-only, ignores --title-only)
    #[arg(short = 'm', long, visible_alias = "md", conflicts_with_all = ["html", "csv_rows"])]
    markdown: bool,

    /// Output as HTML <a> tags (honours --url-only, ignores --title-only)
    #[arg(long, conflicts_with = "csv_rows")]
    html: bool,

    /// Output paper titles only
    #[arg(long, conflicts_with = "url_only")]
    title_only: bool,

    /// Output paper URLs only
    #[arg(long)]
    url_only: bool,

    /// Output catalogues as CSV rows
    #[arg(long)]
    csv_rows: bool,

    /// Also write every extracted paper to this CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Relevance keyword, repeatable; replaces the built-in medical list
    #[arg(short, long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Proxy URL (e.g., http://127.0.0.1:7890)
    #[arg(long)]
    proxy: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.debug, cli.quiet).to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (venues, years) = split_tokens(&cli.conferences_and_years);
    if venues.is_empty() {
        anyhow::bail!("No conference given (e.g. `rustmedai acl 2019`)");
    }
    if years.is_empty() {
        anyhow::bail!("No year given (e.g. `rustmedai acl 2019`)");
    }

    let registry = Arc::new(VenueRegistry::builtin());
    let classifier = if cli.keywords.is_empty() {
        Classifier::medical()
    } else {
        Classifier::new(cli.keywords.as_slice())
    };
    if cli.debug {
        classifier.log_audit();
    }

    let fetch_config = FetchConfig {
        timeout: Duration::from_secs(cli.timeout),
        user_agent: USER_AGENT.to_string(),
        proxy: cli.proxy.clone(),
    };
    let fetcher = HttpFetcher::new(&fetch_config).context("Failed to set up HTTP client")?;
    let adapters = SourceAdapters::new().context("Failed to compile page selectors")?;

    let runner = QueryRunner::new(
        Arc::clone(&registry),
        Arc::new(adapters),
        Arc::new(classifier),
        Arc::new(fetcher),
    );

    let batch = runner.run(&venues, &years, cli.all).await;

    let mode = if cli.csv_rows {
        RenderMode::Csv
    } else {
        RenderMode::from_flags(cli.markdown, cli.html, cli.title_only, cli.url_only)
    };
    let options = ReportOptions {
        quiet: cli.quiet,
        mode,
    };
    let message = report::compose(&batch, &registry, &options).context("Failed to render report")?;
    println!("{}", message);

    if let Some(path) = &cli.csv {
        let rows = save_csv(path, batch.all_papers())
            .with_context(|| format!("Failed to write CSV to {:?}", path))?;
        info!(path = ?path, rows, "CSV written");
        println!("Saved: {:?} ({} papers)", path, rows);
    }

    if cli.copy {
        copy_to_clipboard(&message);
    }

    Ok(())
}

/// Default log level when `RUST_LOG` is unset
fn log_level(debug: bool, quiet: bool) -> Level {
    if debug {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Split positional tokens into venues and years; integer tokens are years.
fn split_tokens(tokens: &[String]) -> (Vec<String>, Vec<String>) {
    let (years, venues): (Vec<&String>, Vec<&String>) = tokens
        .iter()
        .partition(|t| t.parse::<u32>().is_ok());

    (
        venues.into_iter().cloned().collect(),
        years
            .into_iter()
            .filter_map(|y| y.parse::<u32>().ok())
            .map(|y| y.to_string())
            .collect(),
    )
}

fn copy_to_clipboard(message: &str) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(message)) {
        Ok(()) => println!(" * * * Copied this result to clipboard * * *"),
        Err(e) => warn!(error = %e, "Failed to copy result to clipboard"),
    }
}
