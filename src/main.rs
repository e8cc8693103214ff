//! # ETtoday Text News
//!
//! Harvests headlines and article text from the ETtoday news listing and
//! appends them to one plain-text file per category, producing a simple
//! corpus for downstream text processing.
//!
//! ## Usage
//!
//! ```sh
//! ettoday_text_news -o ./corpus
//! ```
//!
//! ## Architecture
//!
//! A run is two independent passes over the same listing pages:
//! 1. **Titles**: enumerate listing pages, extract headlines, strip bylines,
//!    append one title per line
//! 2. **Content**: enumerate listing pages again, fetch each article, strip
//!    bylines from its paragraphs, append one line per sufficiently long
//!    article

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod extract;
mod fetch;
mod listing;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use scrapers::ettoday::Ettoday;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ettoday_text_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = config::load_config(args.config.as_deref()).await?;
    args.apply_overrides(&mut config);
    config.validate()?;
    let categories = config.select_categories(&args.categories)?;
    info!(
        year = config.year,
        first_month = config.first_month,
        last_month = config.last_month,
        days = ?config.days,
        categories = ?categories.iter().map(|c| c.code).collect::<Vec<_>>(),
        pass = ?args.pass,
        "Run configured"
    );

    // Early check: ensure the output dir is writable before any network work
    let output_dir = Path::new(&args.output_dir);
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = fetch::fetcher_with_backoff(&config)?;
    let scraper = Ettoday::new(fetcher, config)?;

    // ---- Titles pass ----
    if args.pass.includes_titles() {
        let reports = pipeline::run_titles_pass(&scraper, &categories, output_dir).await?;
        for report in &reports {
            info!(category = report.category, lines = report.lines, pass = "titles", "Category written");
        }
        let total: usize = reports.iter().map(|r| r.lines).sum();
        info!(total_titles = total, "Titles pass complete");
    }

    // ---- Content pass ----
    if args.pass.includes_content() {
        let reports = pipeline::run_content_pass(&scraper, &categories, output_dir).await?;
        for report in &reports {
            info!(category = report.category, lines = report.lines, pass = "content", "Category written");
        }
        let total: usize = reports.iter().map(|r| r.lines).sum();
        info!(total_articles = total, "Content pass complete");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
