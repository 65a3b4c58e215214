//! Tabular crawl output
//!
//! A [`Table`] is an ordered list of [`Row`]s that all share one [`Patterns`]
//! column set. Each pattern is both the substring searched for in a listing's
//! detail blocks and the name of the column it fills.

use std::collections::HashSet;
use std::sync::Arc;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::{CrawlError, Result};

/// Legacy rendering of a field that was not found in a listing
pub const SENTINEL: &str = "-1";

/// Ordered set of patterns, shared between a table and all of its rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patterns(Arc<[String]>);

impl Patterns {
    /// Build a pattern set; the iteration order becomes the column order.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for pattern in &patterns {
            if !seen.insert(pattern.as_str()) {
                return Err(CrawlError::DuplicatePattern(pattern.clone()));
            }
        }

        Ok(Patterns(patterns.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Column index of a pattern
    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.0.iter().position(|p| p == pattern)
    }
}

/// One listing's field values, positionally aligned with its patterns.
///
/// `None` marks a pattern that was not found in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Patterns,
    values: Vec<Option<String>>,
}

impl Row {
    /// `values` must hold exactly one entry per pattern.
    pub(crate) fn new(columns: Patterns, values: Vec<Option<String>>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Row { columns, values }
    }

    pub fn columns(&self) -> &Patterns {
        &self.columns
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Value of a field, `None` when the pattern is unknown or was not found
    pub fn get(&self, pattern: &str) -> Option<&str> {
        let index = self.columns.position(pattern)?;
        self.values[index].as_deref()
    }

    pub fn is_missing(&self, pattern: &str) -> bool {
        self.columns.position(pattern).is_some() && self.get(pattern).is_none()
    }

    /// Values with missing fields rendered as [`SENTINEL`]
    pub fn legacy_values(&self) -> Vec<&str> {
        self.values
            .iter()
            .map(|v| v.as_deref().unwrap_or(SENTINEL))
            .collect()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (pattern, value) in self.columns.iter().zip(&self.values) {
            map.serialize_entry(pattern, value)?;
        }
        map.end()
    }
}

/// Ordered rows sharing one column set
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Patterns,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Patterns) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &Patterns {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: Row) -> Result<()> {
        self.check_columns(&row.columns)?;
        self.rows.push(row);
        Ok(())
    }

    /// Append all rows of `other` after the rows of `self`
    pub fn concat(mut self, other: Table) -> Result<Table> {
        self.check_columns(&other.columns)?;
        self.rows.extend(other.rows);
        Ok(self)
    }

    /// Drop rows identical to an earlier row across every column.
    /// Returns the number of rows removed.
    pub fn dedup(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(before);

        for row in std::mem::take(&mut self.rows) {
            if seen.insert(row.values.clone()) {
                kept.push(row);
            }
        }

        self.rows = kept;
        before - self.rows.len()
    }

    fn check_columns(&self, found: &Patterns) -> Result<()> {
        if &self.columns != found {
            return Err(CrawlError::ColumnMismatch {
                expected: self.columns.as_slice().to_vec(),
                found: found.as_slice().to_vec(),
            });
        }
        Ok(())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Patterns {
        Patterns::new(["Price", "Area"]).unwrap()
    }

    fn row(price: Option<&str>, area: Option<&str>) -> Row {
        Row::new(
            patterns(),
            vec![price.map(String::from), area.map(String::from)],
        )
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let err = Patterns::new(["Area", "Price", "Area"]).unwrap_err();
        assert!(matches!(err, CrawlError::DuplicatePattern(p) if p == "Area"));
    }

    #[test]
    fn test_row_access() {
        let r = row(Some("450 000 zł"), None);

        assert_eq!(r.get("Price"), Some("450 000 zł"));
        assert_eq!(r.get("Area"), None);
        assert!(r.is_missing("Area"));
        assert!(!r.is_missing("Rooms"));
        assert_eq!(r.legacy_values(), vec!["450 000 zł", "-1"]);
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let json = serde_json::to_string(&row(Some(""), Some(": 50m2"))).unwrap();
        assert_eq!(json, r#"{"Price":"","Area":": 50m2"}"#);

        let missing = serde_json::to_value(row(None, Some("x"))).unwrap();
        assert_eq!(missing["Price"], serde_json::Value::Null);
    }

    #[test]
    fn test_concat_keeps_order() {
        let mut first = Table::new(patterns());
        first.push(row(Some("1"), Some("a"))).unwrap();
        let mut second = Table::new(patterns());
        second.push(row(Some("2"), Some("b"))).unwrap();

        let merged = first.concat(second).unwrap();
        let prices: Vec<_> = merged.rows().iter().map(|r| r.get("Price")).collect();
        assert_eq!(prices, vec![Some("1"), Some("2")]);
        assert_eq!(merged.columns().as_slice(), ["Price", "Area"]);
    }

    #[test]
    fn test_concat_rejects_other_columns() {
        let table = Table::new(patterns());
        let other = Table::new(Patterns::new(["Area", "Price"]).unwrap());

        let err = table.concat(other).unwrap_err();
        assert!(matches!(err, CrawlError::ColumnMismatch { .. }));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut table = Table::new(patterns());
        table.push(row(Some("1"), Some("a"))).unwrap();
        table.push(row(Some("2"), None)).unwrap();
        table.push(row(Some("1"), Some("a"))).unwrap();
        table.push(row(Some("2"), None)).unwrap();
        table.push(row(Some("1"), Some("b"))).unwrap();

        assert_eq!(table.dedup(), 2);
        assert_eq!(
            table.into_rows(),
            vec![
                row(Some("1"), Some("a")),
                row(Some("2"), None),
                row(Some("1"), Some("b")),
            ]
        );
    }

    #[test]
    fn test_table_serializes_as_records() {
        let mut table = Table::new(patterns());
        table.push(row(Some("1"), None)).unwrap();

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!([{"Price": "1", "Area": null}]));
    }
}
