//! HTML extraction modules
//!
//! - `query`: mandatory CSS selector lookups
//! - `links`: listing links on an index page
//! - `listing`: raw detail blocks of a listing page
//! - `fields`: mapping raw details to a row of named fields

mod fields;
mod links;
mod listing;
mod query;

pub use fields::*;
pub use links::*;
pub use listing::*;
pub use query::*;
