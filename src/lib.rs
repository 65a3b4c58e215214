//! Listing crawler for paginated real-estate sites
//!
//! Walks a range of index pages, follows every listing link and turns each
//! listing into one row of labeled fields:
//! - index page -> listing links (`extractors::discover_links`)
//! - listing page -> raw detail blocks (`extractors::extract_details`)
//! - raw details -> row of pattern columns (`extractors::map_fields`)
//! - pages -> one deduplicated table (`crawler::Crawler`)

pub mod crawler;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod layout;
pub mod table;

pub use crawler::*;
pub use error::{CrawlError, Result};
pub use extractors::*;
pub use fetch::*;
pub use layout::*;
pub use table::*;
