//! Crawl configuration
//!
//! Structural anchors of the target site are plain CSS selectors so a markup
//! change on the site is a config edit rather than a code change. Defaults
//! match the Otodom listings markup.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractors::{compile, Anchor, DuplicateMatchPolicy};

/// Full crawl configuration, usually loaded from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlConfig {
    #[serde(default)]
    pub layout: SiteLayout,
    #[serde(default)]
    pub fetch: FetchConfig,
    /// What to do when one pattern matches several detail blocks
    #[serde(default)]
    pub duplicate_matches: DuplicateMatchPolicy,
}

impl CrawlConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// CSS selectors locating each piece of a listing site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteLayout {
    /// One listing summary on an index page
    pub offer: String,
    /// Heading inside a summary
    pub offer_heading: String,
    /// Anchor inside the heading
    pub offer_link: String,
    /// Attribute of the anchor holding the listing URL
    pub link_attr: String,
    /// Region of a listing page holding the labeled details
    pub details: String,
    /// One labeled detail inside the details region
    pub detail_item: String,
    /// The listing price
    pub price: String,
    /// Appended to the price text so it can be matched like any other detail
    pub price_marker: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        SiteLayout {
            offer: "div.offer-item-details".to_string(),
            offer_heading: "h3".to_string(),
            offer_link: "a".to_string(),
            link_attr: "href".to_string(),
            details: "div.css-1d9dws4.egzohkh2".to_string(),
            detail_item: "div.css-18h1kfv.ev4i3ak3".to_string(),
            price: "strong.css-srd1q3.eu6swcv17".to_string(),
            price_marker: " Cena".to_string(),
        }
    }
}

impl SiteLayout {
    /// Parse every selector up front
    pub fn compile(&self) -> Result<CompiledLayout> {
        Ok(CompiledLayout {
            offer: compile(&self.offer)?,
            offer_heading: compile(&self.offer_heading)?,
            offer_link: compile(&self.offer_link)?,
            details: compile(&self.details)?,
            detail_item: compile(&self.detail_item)?,
            price: compile(&self.price)?,
            source: self.clone(),
        })
    }
}

/// A [`SiteLayout`] with parsed selectors
#[derive(Debug, Clone)]
pub struct CompiledLayout {
    pub(crate) offer: Anchor,
    pub(crate) offer_heading: Anchor,
    pub(crate) offer_link: Anchor,
    pub(crate) details: Anchor,
    pub(crate) detail_item: Anchor,
    pub(crate) price: Anchor,
    pub(crate) source: SiteLayout,
}

impl CompiledLayout {
    pub fn layout(&self) -> &SiteLayout {
        &self.source
    }
}

/// Settings for the HTTP client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: Option<String>,
    /// Whole-request timeout; none means the client default
    pub timeout_secs: Option<u64>,
}
