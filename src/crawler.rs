//! Page and range crawling
//!
//! The crawl is a single sequential pass: each index page is fetched, its
//! listing links discovered, and each listing fetched and mapped to a row
//! before the next one is requested. Any failure aborts the whole call.

use tracing::{debug, info};
use url::Url;

use crate::error::{CrawlError, Result};
use crate::extractors::{discover_links, extract_details, map_fields, DuplicateMatchPolicy};
use crate::fetch::{HttpSource, PageSource};
use crate::layout::{CompiledLayout, CrawlConfig};
use crate::table::{Patterns, Row, Table};

/// Crawls a listings site through a [`PageSource`]
pub struct Crawler<S> {
    source: S,
    layout: CompiledLayout,
    policy: DuplicateMatchPolicy,
}

impl<S: PageSource> Crawler<S> {
    /// Fails if any layout selector is invalid
    pub fn new(source: S, config: &CrawlConfig) -> Result<Self> {
        Ok(Crawler {
            source,
            layout: config.layout.compile()?,
            policy: config.duplicate_matches,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Crawl index pages `start..end`, page `x` living at `base_url` + `x`.
    ///
    /// Rows keep page and link order; rows identical across every column are
    /// collapsed to their first occurrence.
    pub fn crawl_range(
        &self,
        base_url: &str,
        start: u32,
        end: u32,
        patterns: &Patterns,
    ) -> Result<Table> {
        let mut total = Table::new(patterns.clone());

        for page in start..end {
            let url = format!("{}{}", base_url, page);
            let html = self.source.fetch(&url)?;
            let table = self.crawl_page(&url, &html, patterns)?;
            total = total.concat(table)?;
        }

        let removed = total.dedup();
        info!(
            rows = total.len(),
            duplicates = removed,
            pages = end.saturating_sub(start),
            "crawl finished"
        );

        Ok(total)
    }

    /// Crawl every listing linked from one index page.
    ///
    /// Links are resolved against `index_url` before fetching.
    pub fn crawl_page(&self, index_url: &str, html: &str, patterns: &Patterns) -> Result<Table> {
        let links = discover_links(html, &self.layout)?;
        info!(url = index_url, links = links.len(), "index page");

        let base = Url::parse(index_url).map_err(|source| CrawlError::InvalidUrl {
            url: index_url.to_string(),
            source,
        })?;

        let mut table = Table::new(patterns.clone());
        for link in &links {
            let url = base.join(link).map_err(|source| CrawlError::InvalidUrl {
                url: link.clone(),
                source,
            })?;
            let row = self
                .crawl_listing(url.as_str(), patterns)
                .map_err(|e| CrawlError::Listing {
                    url: url.to_string(),
                    source: Box::new(e),
                })?;
            table.push(row)?;
        }

        Ok(table)
    }

    /// Fetch one listing and map its details to a row
    pub fn crawl_listing(&self, url: &str, patterns: &Patterns) -> Result<Row> {
        debug!(url, "listing");
        let html = self.source.fetch(url)?;
        let details = extract_details(&html, &self.layout)?;
        map_fields(&details, patterns, self.policy)
    }
}

/// Crawl `start..end` of a live site with the default layout
pub fn crawl_range<I, P>(base_url: &str, start: u32, end: u32, patterns: I) -> Result<Table>
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    let patterns = Patterns::new(patterns)?;
    let crawler = Crawler::new(HttpSource::default(), &CrawlConfig::default())?;
    crawler.crawl_range(base_url, start, end, &patterns)
}
