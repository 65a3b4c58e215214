//! Page retrieval
//!
//! All network reads of a crawl go through [`PageSource`], so the pipeline
//! can run against in-memory fixtures as well as the live site.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{CrawlError, Result};
use crate::layout::FetchConfig;

/// Something that returns the HTML behind a URL
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP fetcher using ureq
#[derive(Clone)]
pub struct HttpSource {
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Self {
        let mut builder = ureq::Agent::config_builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout_global(Some(Duration::from_secs(secs)));
        }
        if let Some(ref user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        HttpSource {
            agent: ureq::Agent::new_with_config(builder.build()),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String> {
        // Non-success statuses surface as errors from call()
        let resp = self
            .agent
            .get(url)
            .call()
            .map_err(|e| CrawlError::fetch(url, e))?;

        resp.into_body()
            .read_to_string()
            .map_err(|e| CrawlError::fetch(url, e))
    }
}

/// Fixed URL to HTML map, recording every URL requested
#[derive(Debug, Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
    fetched: RefCell<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// URLs fetched so far, in request order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl PageSource for StaticSource {
    fn fetch(&self, url: &str) -> Result<String> {
        self.fetched.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| CrawlError::fetch(url, "no such page"))
    }
}
