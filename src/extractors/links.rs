//! Listing link discovery on an index page

use scraper::Html;

use super::query::{attr, select_all, select_one};
use crate::error::Result;
use crate::layout::CompiledLayout;

/// Listing links of an index page, in document order.
///
/// Links are returned exactly as written in the markup, duplicates included.
/// Every offer summary must contain a heading with a linked anchor.
pub fn discover_links(html: &str, layout: &CompiledLayout) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for offer in select_all(document.root_element(), &layout.offer) {
        let heading = select_one(offer, &layout.offer_heading, "offer summary")?;
        let anchor = select_one(heading, &layout.offer_link, "offer heading")?;
        let href = attr(anchor, &layout.offer_link, &layout.source.link_attr)?;
        links.push(href.to_string());
    }

    Ok(links)
}
