//! Listing page enumeration.
//!
//! ETtoday publishes one listing page per day and category at
//! `/news/news-list-{year}-{month}-{day}-{category}.htm`, with month and day
//! written without zero padding.

use crate::config::ScrapeConfig;
use crate::models::{Category, ListingPage};
use chrono::{Datelike, NaiveDate};
use itertools::iproduct;
use std::error::Error;
use tracing::{debug, warn};
use url::Url;

/// Build the listing URL for a category on a given date.
pub fn listing_url(base: &Url, date: NaiveDate, code: u32) -> Result<Url, Box<dyn Error>> {
    let path = format!(
        "/news/news-list-{}-{}-{}-{}.htm",
        date.year(),
        date.month(),
        date.day(),
        code
    );
    Ok(base.join(&path)?)
}

/// Enumerate the listing pages of a category, months outermost and the
/// configured days in their configured order.
///
/// Day/month combinations that are not real dates (e.g. the 30th of
/// February) are logged and skipped.
pub fn listing_pages(
    config: &ScrapeConfig,
    base: &Url,
    category: &Category,
) -> Result<Vec<ListingPage>, Box<dyn Error>> {
    let mut pages = Vec::new();
    for (month, &day) in iproduct!(config.first_month..=config.last_month, config.days.iter()) {
        let Some(date) = NaiveDate::from_ymd_opt(config.year, month, day) else {
            warn!(year = config.year, month, day, "Skipping invalid listing date");
            continue;
        };
        pages.push(ListingPage {
            category: category.code,
            date,
            url: listing_url(base, date, category.code)?,
        });
    }
    debug!(category = category.code, count = pages.len(), "Enumerated listing pages");
    Ok(pages)
}
