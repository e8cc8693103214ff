//! Run configuration loaded from an optional YAML file.
//!
//! Every field has a default, so running without a config file reproduces
//! the classic harvest: the 2017 listings for months 1 through 10, the 25th
//! and the 10th of each month, across the ten standard categories.
//!
//! # Example
//!
//! ```yaml
//! year: 2018
//! first_month: 3
//! last_month: 4
//! days: [1, 15]
//! categories:
//!   - { code: 1, name: 政治 }
//!   - { code: 5, name: 生活 }
//! concurrency: 4
//! ```

use crate::models::{Category, default_categories};
use serde::Deserialize;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// CSS selectors used to locate headlines and story paragraphs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// Container holding the headline list on a listing page.
    pub listing_container: String,
    /// Heading element wrapping each headline inside the container.
    pub listing_heading: String,
    /// Anchor inside the heading; only the first match is used.
    pub listing_anchor: String,
    /// Container holding the article body.
    pub story_container: String,
    /// Paragraph elements inside the story container.
    pub story_paragraph: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_container: "div.part_list_2".to_string(),
            listing_heading: "h3".to_string(),
            listing_anchor: "a".to_string(),
            story_container: "div.story".to_string(),
            story_paragraph: "p".to_string(),
        }
    }
}

/// Full scrape configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeConfig {
    /// Site root; listing paths and article hrefs are resolved against it.
    pub base_url: String,
    /// Year of the listing pages.
    pub year: i32,
    /// First month enumerated (inclusive).
    pub first_month: u32,
    /// Last month enumerated (inclusive).
    pub last_month: u32,
    /// Days of each month, visited in this order.
    pub days: Vec<u32>,
    /// Categories, processed in this order.
    pub categories: Vec<Category>,
    pub selectors: SelectorConfig,
    /// Separator between a byline and the text that follows it.
    pub byline_delimiter: String,
    /// Appended after every paragraph when an article is flattened to a line.
    pub paragraph_joiner: String,
    /// Articles need strictly more paragraphs than this to be written.
    pub min_paragraphs: usize,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Extra attempts per page after the first one fails.
    pub max_retries: usize,
    /// Initial backoff between attempts, doubled each time.
    pub retry_base_delay_ms: u64,
    /// Article fetches allowed in flight at once.
    pub concurrency: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.ettoday.net".to_string(),
            year: 2017,
            first_month: 1,
            last_month: 10,
            days: vec![25, 10],
            categories: default_categories(),
            selectors: SelectorConfig::default(),
            byline_delimiter: "／".to_string(),
            paragraph_joiner: "，".to_string(),
            min_paragraphs: 3,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            max_retries: 0,
            retry_base_delay_ms: 1000,
            concurrency: 1,
        }
    }
}

impl ScrapeConfig {
    /// Reject configurations that would enumerate nothing or loop forever.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if !(1..=12).contains(&self.first_month) || !(1..=12).contains(&self.last_month) {
            return Err(format!(
                "months must be within 1..=12 (got {}..={})",
                self.first_month, self.last_month
            )
            .into());
        }
        if self.first_month > self.last_month {
            return Err(format!(
                "first_month {} is after last_month {}",
                self.first_month, self.last_month
            )
            .into());
        }
        if self.days.is_empty() {
            return Err("at least one listing day is required".into());
        }
        if self.categories.is_empty() {
            return Err("at least one category is required".into());
        }
        if self.byline_delimiter.is_empty() {
            return Err("byline_delimiter must not be empty".into());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".into());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be at least 1".into());
        }
        Ok(())
    }

    /// Resolve the categories to run. An empty `codes` slice selects all of
    /// them in configured order; otherwise the configured order is kept and
    /// unknown codes are an error.
    pub fn select_categories(&self, codes: &[u32]) -> Result<Vec<Category>, Box<dyn Error>> {
        if codes.is_empty() {
            return Ok(self.categories.clone());
        }
        if let Some(unknown) = codes
            .iter()
            .find(|code| !self.categories.iter().any(|c| c.code == **code))
        {
            return Err(format!("unknown category code {unknown}").into());
        }
        Ok(self
            .categories
            .iter()
            .filter(|c| codes.contains(&c.code))
            .cloned()
            .collect())
    }
}

/// Load the configuration from `path`, or the defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<ScrapeConfig, Box<dyn Error>> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(ScrapeConfig::default());
    };
    let raw = fs::read_to_string(path).await?;
    let config: ScrapeConfig = serde_yaml::from_str(&raw)?;
    info!(
        path,
        categories = config.categories.len(),
        year = config.year,
        "Loaded configuration"
    );
    Ok(config)
}
