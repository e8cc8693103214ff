//! Structural extraction of headlines and story paragraphs.
//!
//! Text is taken with "single string" semantics: an element contributes text
//! only when it holds exactly one child and that child is a text node, or is
//! itself an element holding a single string. Anchors or paragraphs that mix
//! markup and text (`<p>foo <b>bar</b></p>`) yield nothing.

use crate::config::SelectorConfig;
use crate::models::Headline;
use scraper::{ElementRef, Html, Node, Selector};
use std::error::Error;
use std::fmt;

/// Which container an extraction was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Listing,
    Story,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Listing => f.write_str("listing"),
            Container::Story => f.write_str("story"),
        }
    }
}

/// Errors raised while compiling selectors or walking a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A configured CSS selector failed to parse.
    InvalidSelector { selector: String, reason: String },
    /// The page has no element matching the container selector.
    MissingContainer(Container),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::InvalidSelector { selector, reason } => {
                write!(f, "invalid selector `{selector}`: {reason}")
            }
            ExtractError::MissingContainer(container) => {
                write!(f, "no {container} container found in page")
            }
        }
    }
}

impl Error for ExtractError {}

/// Selectors compiled once per run.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    listing_container: Selector,
    listing_heading: Selector,
    listing_anchor: Selector,
    story_container: Selector,
    story_paragraph: Selector,
}

fn compile(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

impl CompiledSelectors {
    pub fn new(config: &SelectorConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            listing_container: compile(&config.listing_container)?,
            listing_heading: compile(&config.listing_heading)?,
            listing_anchor: compile(&config.listing_anchor)?,
            story_container: compile(&config.story_container)?,
            story_paragraph: compile(&config.story_paragraph)?,
        })
    }
}

/// Text of an element that holds exactly one string, descending through
/// lone element children.
pub fn single_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Text(text) => Some(String::from(&**text)),
        Node::Element(_) => ElementRef::wrap(only).and_then(single_string),
        _ => None,
    }
}

/// Pull every headline out of the first listing container.
///
/// Each heading contributes its first anchor; headings without an anchor are
/// ignored.
pub fn parse_listing(html: &str, selectors: &CompiledSelectors) -> Result<Vec<Headline>, ExtractError> {
    let document = Html::parse_document(html);
    let container = document
        .select(&selectors.listing_container)
        .next()
        .ok_or(ExtractError::MissingContainer(Container::Listing))?;

    Ok(container
        .select(&selectors.listing_heading)
        .filter_map(|heading| heading.select(&selectors.listing_anchor).next())
        .map(|anchor| Headline {
            title: single_string(anchor),
            href: anchor.value().attr("href").map(str::to_string),
        })
        .collect())
}

/// Collect the single-string paragraphs of the first story container, in
/// document order.
pub fn parse_story(html: &str, selectors: &CompiledSelectors) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(html);
    let container = document
        .select(&selectors.story_container)
        .next()
        .ok_or(ExtractError::MissingContainer(Container::Story))?;

    Ok(container
        .select(&selectors.story_paragraph)
        .filter_map(single_string)
        .collect())
}
