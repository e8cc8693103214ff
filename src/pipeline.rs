//! Batch driver for the titles and content passes.
//!
//! The passes share nothing: the content pass enumerates and downloads the
//! listing pages again instead of reusing anything from the titles pass.

use crate::fetch::FetchPage;
use crate::models::Category;
use crate::outputs::text::append_lines;
use crate::scrapers::ettoday::Ettoday;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Lines appended for one category during one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub category: u32,
    pub lines: usize,
}

/// Append every category's titles to its file.
#[instrument(level = "info", skip_all, fields(categories = categories.len()))]
pub async fn run_titles_pass<F: FetchPage>(
    scraper: &Ettoday<F>,
    categories: &[Category],
    output_dir: &Path,
) -> Result<Vec<PassReport>, Box<dyn Error>> {
    let mut reports = Vec::with_capacity(categories.len());
    for category in categories {
        let titles = scraper.index_titles(category).await?;
        append_lines(output_dir, category, &titles).await?;
        info!(category = category.code, name = %category.name, titles = titles.len(), "Titles pass done for category");
        reports.push(PassReport {
            category: category.code,
            lines: titles.len(),
        });
    }
    Ok(reports)
}

/// Append every category's article bodies to its file.
#[instrument(level = "info", skip_all, fields(categories = categories.len()))]
pub async fn run_content_pass<F: FetchPage>(
    scraper: &Ettoday<F>,
    categories: &[Category],
    output_dir: &Path,
) -> Result<Vec<PassReport>, Box<dyn Error>> {
    let mut reports = Vec::with_capacity(categories.len());
    for category in categories {
        let urls = scraper.index_article_urls(category).await?;
        let articles = scraper.fetch_articles(urls).await;
        let bodies = scraper.collect_bodies(&articles);
        append_lines(output_dir, category, &bodies).await?;
        info!(
            category = category.code,
            name = %category.name,
            fetched = articles.len(),
            written = bodies.len(),
            "Content pass done for category"
        );
        reports.push(PassReport {
            category: category.code,
            lines: bodies.len(),
        });
    }
    Ok(reports)
}
