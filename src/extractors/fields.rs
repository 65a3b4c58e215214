//! Pattern-to-column mapping
//!
//! Each pattern is looked up as a plain substring in every raw detail block.
//! The matched block, with the first occurrence of the pattern removed, is
//! the field value. No trimming or other normalization is applied.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CrawlError, Result};
use crate::table::{Patterns, Row};

/// Handling of a pattern found in more than one detail block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateMatchPolicy {
    /// Record every match and fill the row positionally. Extra matches shift
    /// later columns and the surplus values at the end are dropped.
    #[default]
    Positional,
    /// Keep only the first matching block for each pattern
    FirstMatch,
    /// Fail the listing
    Reject,
}

/// Append `marker` to a price so it reads like a labeled detail
pub fn wrap_price(price: &str, marker: &str) -> String {
    format!("{}{}", price, marker)
}

/// Values for every pattern, in pattern order.
///
/// A pattern contributes one value per matching detail, or a single `None`
/// when nothing matches, so the result can be longer than `patterns`.
pub fn collect_values<S: AsRef<str>>(details: &[S], patterns: &Patterns) -> Vec<Option<String>> {
    let details = as_strs(details);
    let mut values = Vec::with_capacity(patterns.len());

    for pattern in patterns.iter() {
        let before = values.len();
        for detail in &details {
            if detail.contains(pattern) {
                values.push(Some(detail.replacen(pattern, "", 1)));
            }
        }
        if values.len() == before {
            values.push(None);
        }
    }

    values
}

/// Build one row from a listing's raw details
pub fn map_fields<S: AsRef<str>>(
    details: &[S],
    patterns: &Patterns,
    policy: DuplicateMatchPolicy,
) -> Result<Row> {
    let values = match policy {
        DuplicateMatchPolicy::Positional => {
            let mut values = collect_values(details, patterns);
            if values.len() > patterns.len() {
                warn!(
                    matched = values.len(),
                    columns = patterns.len(),
                    "patterns matched several detail blocks, columns are shifted"
                );
                values.truncate(patterns.len());
            }
            values
        }
        DuplicateMatchPolicy::FirstMatch => patterns
            .iter()
            .map(|pattern| {
                as_strs(details)
                    .into_iter()
                    .find(|detail| detail.contains(pattern))
                    .map(|detail| detail.replacen(pattern, "", 1))
            })
            .collect(),
        DuplicateMatchPolicy::Reject => {
            let details = as_strs(details);
            let mut values = Vec::with_capacity(patterns.len());
            for pattern in patterns.iter() {
                let mut matches = details
                    .iter()
                    .filter(|detail| detail.contains(pattern));
                let first = matches.next();
                let extra = matches.count();
                if extra > 0 {
                    return Err(CrawlError::AmbiguousMatch {
                        pattern: pattern.to_string(),
                        matches: extra + 1,
                    });
                }
                values.push(first.map(|detail| detail.replacen(pattern, "", 1)));
            }
            values
        }
    };

    Ok(Row::new(patterns.clone(), values))
}

fn as_strs<S: AsRef<str>>(details: &[S]) -> Vec<&str> {
    details.iter().map(|d| d.as_ref()).collect()
}
