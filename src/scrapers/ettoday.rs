//! ETtoday news listing scraper.
//!
//! Listing pages at `https://www.ettoday.net/news/news-list-Y-M-D-C.htm` hold
//! a `div.part_list_2` container of `h3` headlines, each linking to an
//! article whose body sits in `div.story`.
//!
//! The scraper exposes the two independent passes of a run:
//!
//! 1. **Titles**: [`Ettoday::index_titles`] walks the listings and returns
//!    byline-stripped headline text
//! 2. **Content**: [`Ettoday::index_article_urls`] walks the listings again,
//!    then [`Ettoday::fetch_articles`] downloads each article's paragraphs
//!
//! Failed pages are logged and skipped without failing the batch.

use crate::config::ScrapeConfig;
use crate::extract::{CompiledSelectors, parse_listing, parse_story};
use crate::fetch::FetchPage;
use crate::listing::listing_pages;
use crate::models::{Category, Headline};
use crate::normalize::{join_paragraphs, strip_byline};
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// A configured scraper bound to a page fetcher.
#[derive(Debug)]
pub struct Ettoday<F> {
    fetcher: F,
    config: ScrapeConfig,
    selectors: CompiledSelectors,
    base: Url,
}

impl<F> Ettoday<F>
where
    F: FetchPage,
{
    pub fn new(fetcher: F, config: ScrapeConfig) -> Result<Self, Box<dyn Error>> {
        let base = Url::parse(&config.base_url)?;
        let selectors = CompiledSelectors::new(&config.selectors)?;
        Ok(Self {
            fetcher,
            config,
            selectors,
            base,
        })
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Headlines of every listing page of a category, in enumeration order.
    ///
    /// Pages that fail to download or lack the listing container are
    /// skipped.
    #[instrument(level = "info", skip_all, fields(category = category.code))]
    async fn listing_headlines(&self, category: &Category) -> Result<Vec<Headline>, Box<dyn Error>> {
        let pages = listing_pages(&self.config, &self.base, category)?;

        let per_page: Vec<Vec<Headline>> = stream::iter(pages)
            .then(|page| async move {
                let html = match self.fetcher.fetch(&page.url).await {
                    Ok(html) => html,
                    Err(e) => {
                        warn!(url = %page.url, error = %e, "Listing fetch failed; skipping page");
                        return Vec::new();
                    }
                };
                match parse_listing(&html, &self.selectors) {
                    Ok(headlines) => {
                        debug!(url = %page.url, date = %page.date, count = headlines.len(), "Parsed listing page");
                        headlines
                    }
                    Err(e) => {
                        warn!(
                            url = %page.url,
                            error = %e,
                            html_preview = %truncate_for_log(&html, 200),
                            "Listing parse failed; skipping page"
                        );
                        Vec::new()
                    }
                }
            })
            .collect()
            .await;

        Ok(per_page.into_iter().flatten().collect())
    }

    /// Byline-stripped titles of every headline in a category.
    #[instrument(level = "info", skip_all, fields(category = category.code, name = %category.name))]
    pub async fn index_titles(&self, category: &Category) -> Result<Vec<String>, Box<dyn Error>> {
        let titles: Vec<String> = self
            .listing_headlines(category)
            .await?
            .into_iter()
            .filter_map(|headline| headline.title)
            .map(|title| strip_byline(&title, &self.config.byline_delimiter))
            .collect();

        info!(count = titles.len(), "Indexed titles");
        Ok(titles)
    }

    /// Absolute article URLs of every headline in a category, whether or not
    /// the headline has usable title text.
    #[instrument(level = "info", skip_all, fields(category = category.code, name = %category.name))]
    pub async fn index_article_urls(&self, category: &Category) -> Result<Vec<Url>, Box<dyn Error>> {
        let mut urls = Vec::new();
        for headline in self.listing_headlines(category).await? {
            let Some(href) = headline.href else {
                debug!(title = ?headline.title, "Headline has no link");
                continue;
            };
            match self.base.join(&href) {
                Ok(url) => urls.push(url),
                Err(e) => warn!(%href, error = %e, "Unresolvable article link"),
            }
        }

        info!(count = urls.len(), "Indexed article URLs");
        Ok(urls)
    }

    /// Fetch every article and return its byline-stripped paragraphs.
    ///
    /// Output order follows `urls`; at most `concurrency` requests are in
    /// flight. Articles that fail to download or lack a story container are
    /// dropped. Articles with no usable paragraphs are kept as empty lists.
    #[instrument(level = "info", skip_all, fields(count = urls.len()))]
    pub async fn fetch_articles(&self, urls: Vec<Url>) -> Vec<Vec<String>> {
        let articles: Vec<Vec<String>> = stream::iter(urls)
            .map(|url| async move {
                match self.fetch_article(&url).await {
                    Ok(paragraphs) => {
                        debug!(%url, paragraphs = paragraphs.len(), "Fetched article");
                        Some(paragraphs)
                    }
                    Err(e) => {
                        warn!(%url, error = %e, "Article fetch failed; skipping");
                        None
                    }
                }
            })
            .buffered(self.config.concurrency.max(1))
            .filter_map(std::future::ready)
            .collect()
            .await;

        info!(count = articles.len(), "Fetched article contents");
        articles
    }

    /// Fetch a single article.
    async fn fetch_article(&self, url: &Url) -> Result<Vec<String>, Box<dyn Error>> {
        let html = self.fetcher.fetch(url).await?;
        let paragraphs = parse_story(&html, &self.selectors)?;
        Ok(paragraphs
            .iter()
            .map(|p| strip_byline(p, &self.config.byline_delimiter))
            .collect())
    }

    /// Flatten fetched articles into output lines, dropping short ones.
    pub fn collect_bodies(&self, articles: &[Vec<String>]) -> Vec<String> {
        collect_bodies(
            articles,
            self.config.min_paragraphs,
            &self.config.paragraph_joiner,
        )
    }
}

/// Keep articles with strictly more than `min_paragraphs` paragraphs, each
/// flattened to one line.
pub fn collect_bodies(articles: &[Vec<String>], min_paragraphs: usize, joiner: &str) -> Vec<String> {
    articles
        .iter()
        .filter(|paragraphs| paragraphs.len() > min_paragraphs)
        .map(|paragraphs| join_paragraphs(paragraphs, joiner))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::{FakeSite, SlowSite};
    use std::time::Duration;

    const BASE: &str = "https://www.ettoday.net";

    fn listing_url(month: u32, day: u32, code: u32) -> String {
        format!("{BASE}/news/news-list-2017-{month}-{day}-{code}.htm")
    }

    fn one_page_config(concurrency: usize) -> ScrapeConfig {
        ScrapeConfig {
            first_month: 1,
            last_month: 1,
            days: vec![25, 10],
            concurrency,
            ..ScrapeConfig::default()
        }
    }

    fn listing(items: &[(&str, &str)]) -> String {
        let headlines: String = items
            .iter()
            .map(|(href, title)| format!(r#"<h3><a href="{href}">{title}</a></h3>"#))
            .collect();
        format!(r#"<html><body><div class="part_list_2">{headlines}</div></body></html>"#)
    }

    fn story(paragraphs: &[&str]) -> String {
        let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
        format!(r#"<html><body><div class="story">{body}</div></body></html>"#)
    }

    fn politics() -> Category {
        Category::new(1, "政治")
    }

    #[tokio::test]
    async fn test_index_titles_strips_bylines_across_pages() {
        let site = FakeSite::new()
            .with_page(
                &listing_url(1, 25, 1),
                &listing(&[("/news/a.htm", "記者甲／台北報導"), ("/news/b.htm", "立院三讀")]),
            )
            .with_page(&listing_url(1, 10, 1), &listing(&[("/news/c.htm", "地方／新聞")]));
        let scraper = Ettoday::new(site, one_page_config(1)).unwrap();

        let titles = scraper.index_titles(&politics()).await.unwrap();
        assert_eq!(titles, vec!["台北報導", "立院三讀", "新聞"]);
    }

    #[tokio::test]
    async fn test_index_titles_skips_broken_pages() {
        let site = FakeSite::new()
            .with_page(&listing_url(1, 25, 1), "<html><body>maintenance</body></html>")
            .with_page(&listing_url(1, 10, 1), &listing(&[("/news/c.htm", "仍然可用")]));
        let scraper = Ettoday::new(site, one_page_config(1)).unwrap();

        let titles = scraper.index_titles(&politics()).await.unwrap();
        assert_eq!(titles, vec!["仍然可用"]);
    }

    #[tokio::test]
    async fn test_index_article_urls_resolves_links() {
        let page = r#"<div class="part_list_2">
            <h3><a href="/news/20170125/1.htm">一</a></h3>
            <h3><a href="/news/20170125/2.htm">混合<b>標題</b></a></h3>
            <h3><a href="https://sports.ettoday.net/news/3">三</a></h3>
            <h3><a>沒有連結</a></h3>
        </div>"#;
        let site = FakeSite::new().with_page(&listing_url(1, 25, 1), page);
        let config = ScrapeConfig {
            days: vec![25],
            ..one_page_config(1)
        };
        let scraper = Ettoday::new(site, config).unwrap();

        let urls = scraper.index_article_urls(&politics()).await.unwrap();
        let urls: Vec<&str> = urls.iter().map(Url::as_str).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.ettoday.net/news/20170125/1.htm",
                "https://www.ettoday.net/news/20170125/2.htm",
                "https://sports.ettoday.net/news/3",
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_articles_preserves_order_and_skips_failures() {
        let site = FakeSite::new()
            .with_page(&format!("{BASE}/news/1.htm"), &story(&["記者甲／台北報導", "第二段"]))
            .with_page(&format!("{BASE}/news/2.htm"), "<html><body><p>no story</p></body></html>")
            .with_page(&format!("{BASE}/news/4.htm"), &story(&[]));
        let scraper = Ettoday::new(site, one_page_config(3)).unwrap();

        let urls = ["1", "2", "3", "4"]
            .iter()
            .map(|n| Url::parse(&format!("{BASE}/news/{n}.htm")).unwrap())
            .collect();
        let articles = scraper.fetch_articles(urls).await;

        assert_eq!(
            articles,
            vec![vec!["台北報導".to_string(), "第二段".to_string()], vec![]]
        );
    }

    #[tokio::test]
    async fn test_fetch_articles_keeps_order_under_bounded_concurrency() {
        // Later articles answer first.
        let site = (1..=4u64).fold(SlowSite::new(), |site, n| {
            site.with_page(
                &format!("{BASE}/news/{n}.htm"),
                Duration::from_millis(50 - 10 * n),
                &story(&[&n.to_string()]),
            )
        });
        let scraper = Ettoday::new(site, one_page_config(2)).unwrap();

        let urls = (1..=4)
            .map(|n| Url::parse(&format!("{BASE}/news/{n}.htm")).unwrap())
            .collect();
        let articles = scraper.fetch_articles(urls).await;

        let expected: Vec<Vec<String>> = (1..=4).map(|n| vec![n.to_string()]).collect();
        assert_eq!(articles, expected);
        assert_eq!(scraper.fetcher().peak_in_flight(), 2);
    }

    #[test]
    fn test_collect_bodies_requires_more_than_min_paragraphs() {
        let articles = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["一".to_string(), "二".to_string(), "三".to_string(), "四".to_string()],
            vec![],
        ];
        assert_eq!(collect_bodies(&articles, 3, "，"), vec!["一，二，三，四，"]);
        assert_eq!(collect_bodies(&articles, 0, "，").len(), 2);
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let config = ScrapeConfig {
            base_url: "not a url".to_string(),
            ..ScrapeConfig::default()
        };
        assert!(Ettoday::new(FakeSite::new(), config).is_err());
    }
}
