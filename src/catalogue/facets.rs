//! # Facets
//!
//! The choices a filter control offers are built from the rows themselves:
//!
//! - Option and keyword columns list each distinct value with the number of rows (or
//!   list elements) holding it. Values are grouped case-insensitively, keep the casing
//!   they were first seen with, and are ordered case-insensitively. When some rows
//!   hold no value, a trailing [`FacetValue::NoValue`] entry carries their count.
//! - Slider columns offer the range spanned by their non-null numbers.

use crate::model::{Control, Row, Value};
use crate::schema::Schema;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetValue {
    Value(String),
    NoValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetEntry {
    pub value: FacetValue,
    pub count: usize,
}

impl FacetEntry {
    /// Display label, `None` for the no-value entry.
    pub fn label(&self) -> &str {
        match &self.value {
            FacetValue::Value(v) => v,
            FacetValue::NoValue => "None",
        }
    }
}

/// The facets of one column, by control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Facets {
    Options { entries: Vec<FacetEntry> },
    Keywords { entries: Vec<FacetEntry> },
    Range { bounds: Option<(f64, f64)> },
    Checkbox { checked: usize, total: usize },
    Unfiltered,
}

#[derive(Default)]
struct Tally {
    slots: HashMap<String, usize>,
    entries: Vec<FacetEntry>,
    nulls: usize,
}

impl Tally {
    fn add(&mut self, value: &str) {
        let key = value.to_lowercase();
        match self.slots.get(&key) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.slots.insert(key, self.entries.len());
                self.entries.push(FacetEntry {
                    value: FacetValue::Value(value.to_string()),
                    count: 1,
                });
            }
        }
    }

    fn finish(self) -> Vec<FacetEntry> {
        let mut entries = self.entries;
        entries.sort_by_cached_key(|entry| entry.label().to_lowercase());
        if self.nulls > 0 {
            entries.push(FacetEntry {
                value: FacetValue::NoValue,
                count: self.nulls,
            });
        }
        entries
    }
}

pub fn option_facets<'a, I>(rows: I, column: &str) -> Vec<FacetEntry>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut tally = Tally::default();
    for row in rows {
        match row.get(column).and_then(Value::as_text) {
            Some(text) => tally.add(text),
            None => tally.nulls += 1,
        }
    }
    tally.finish()
}

/// Facets over the elements of a LIST column. Rows with an empty list count towards
/// the no-value entry.
pub fn keyword_facets<'a, I>(rows: I, column: &str) -> Vec<FacetEntry>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut tally = Tally::default();
    for row in rows {
        let items = row.get(column).and_then(Value::as_list).unwrap_or_default();
        if items.is_empty() {
            tally.nulls += 1;
        }
        for item in items {
            tally.add(item);
        }
    }
    tally.finish()
}

/// `(min, max)` of the column's non-null numbers.
pub fn slider_bounds<'a, I>(rows: I, column: &str) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter()
        .filter_map(|row| row.get(column).and_then(Value::as_number))
        .fold(None, |bounds, n| match bounds {
            None => Some((n, n)),
            Some((min, max)) => Some((f64::min(min, n), f64::max(max, n))),
        })
}

/// Facets for `column` according to its control, `None` for unknown columns.
pub fn column_facets(schema: &Schema, rows: &[&Row], column: &str) -> Option<Facets> {
    let col = schema.column(column)?;
    let rows = rows.iter().copied();
    let facets = match col.control() {
        Control::Option => Facets::Options {
            entries: option_facets(rows, column),
        },
        Control::MultiOption => Facets::Keywords {
            entries: keyword_facets(rows, column),
        },
        Control::Slider => Facets::Range {
            bounds: slider_bounds(rows, column),
        },
        Control::Checkbox => {
            let total = rows.len();
            let checked = rows
                .filter(|row| row.get(column).and_then(Value::as_bool) == Some(true))
                .count();
            Facets::Checkbox { checked, total }
        }
        Control::None => Facets::Unfiltered,
    };
    Some(facets)
}
