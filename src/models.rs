//! Data models for listing pages, headlines and categories.
//!
//! This module defines the core data structures shared by the scraper,
//! the pipeline and the output writers:
//! - [`Category`]: an ETtoday topical section and its numeric code
//! - [`ListingPage`]: one dated listing page of a category
//! - [`Headline`]: a single entry pulled out of a listing page

use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

/// A topical section of the news listing.
///
/// The `code` is the number ETtoday uses in its listing URLs and is also the
/// stem of the output file (`<code>.txt`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Numeric section code used in listing URLs.
    pub code: u32,
    /// Human-readable label, used only for logging.
    pub name: String,
}

impl Category {
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// File name the category accumulates into.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.code)
    }
}

/// The sections harvested when no config file overrides them, in run order.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(1, "政治"),
        Category::new(17, "財經"),
        Category::new(2, "國際"),
        Category::new(6, "社會"),
        Category::new(9, "影劇"),
        Category::new(10, "體育"),
        Category::new(20, "3C"),
        Category::new(30, "時尚"),
        Category::new(24, "遊戲"),
        Category::new(5, "生活"),
    ]
}

/// One dated listing page for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Code of the category the page belongs to.
    pub category: u32,
    /// Publication date the listing covers.
    pub date: NaiveDate,
    /// Absolute URL of the listing page.
    pub url: Url,
}

/// A headline entry found inside a listing container.
///
/// Either field may be missing: the anchor text is only taken when the
/// anchor holds a single string, and some anchors carry no `href`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Headline {
    /// The anchor's single string, before byline stripping.
    pub title: Option<String>,
    /// The raw `href` attribute, usually site-relative.
    pub href: Option<String>,
}
