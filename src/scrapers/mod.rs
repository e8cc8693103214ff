//! News source scrapers.
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | ETtoday | [`ettoday`] | HTML scraping | Dated per-category listing pages |
//!
//! A scraper module exposes an indexing step that walks listing pages and a
//! fetching step that downloads article content. Failed fetches are logged
//! and skipped.

pub mod ettoday;
