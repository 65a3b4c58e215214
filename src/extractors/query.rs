//! CSS selector lookups
//!
//! Thin layer over the scraper crate. Every single-element lookup here is
//! mandatory: a missing element or attribute is an error, since it means the
//! site markup no longer matches the layout.

use scraper::element_ref::Select;
use scraper::{ElementRef, Selector};

use crate::error::{CrawlError, Result};

/// A parsed selector together with its source text for error reports
#[derive(Debug, Clone)]
pub struct Anchor {
    selector: Selector,
    source: String,
}

impl Anchor {
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Parse a CSS selector
pub fn compile(selector_str: &str) -> Result<Anchor> {
    let selector = Selector::parse(selector_str).map_err(|e| CrawlError::InvalidSelector {
        selector: selector_str.to_string(),
        reason: e.to_string(),
    })?;

    Ok(Anchor {
        selector,
        source: selector_str.to_string(),
    })
}

/// First descendant of `scope` matching `anchor`
pub fn select_one<'a>(
    scope: ElementRef<'a>,
    anchor: &Anchor,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    scope
        .select(&anchor.selector)
        .next()
        .ok_or_else(|| CrawlError::MissingElement {
            selector: anchor.source.clone(),
            context,
        })
}

/// All descendants of `scope` matching `anchor`, in document order
pub fn select_all<'a, 'b>(scope: ElementRef<'a>, anchor: &'b Anchor) -> Select<'a, 'b> {
    scope.select(&anchor.selector)
}

/// Attribute value of an element found through `anchor`
pub fn attr<'a>(element: ElementRef<'a>, anchor: &Anchor, name: &str) -> Result<&'a str> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| CrawlError::MissingAttribute {
            selector: anchor.source.clone(),
            attr: name.to_string(),
        })
}

/// Concatenated text of all descendant text nodes, untrimmed
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
