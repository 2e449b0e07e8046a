//! # Column Filters
//!
//! A [`FilterState`] maps column names to the current value of that column's filter
//! control, plus the free-text search query. A row is kept when it passes **every**
//! active column filter.
//!
//! ## Predicates per control
//!
//! | Control | Filter value | Row is excluded when |
//! |---------|--------------|----------------------|
//! | `NONE` | anything | never |
//! | `SLIDER` | `Range(min, max)` | the number is null or outside `[min, max]` |
//! | `OPTION` | `Option(s)` | the text is not `s` (case-insensitive) |
//! | `MULTIOPTION` | `AnyOf(list)` | `list` is non-empty and no element matches (case-insensitive) |
//! | `CHECKBOX` | `Checked(true)` | the boolean is not true |
//!
//! The [`FilterValue::NoValue`] sentinel inverts this: it keeps exactly the rows whose
//! value is null or empty. A filter value whose shape does not fit the column's control
//! imposes no constraint; filters must never fail while a user is typing.

use crate::model::{ColumnSchema, Control, Row, Value};
use crate::schema::Schema;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The value of a single column filter.
///
/// Serialized externally tagged, e.g. `{"range": [2005, 2015]}`, `{"option": "CHI"}`,
/// `{"any_of": ["Blind"]}`, `{"checked": true}` or `"no_value"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// Inclusive numeric range for slider columns.
    Range(f64, f64),
    /// Single choice for option columns.
    Option(String),
    /// Any-of choices for multi-option columns. Empty means no constraint.
    AnyOf(Vec<String>),
    /// Checkbox state. Only `true` constrains.
    Checked(bool),
    /// Keep only rows without a value.
    NoValue,
}

/// Current filter inputs. Absent keys and `None` values are inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub columns: BTreeMap<String, Option<FilterValue>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn with(mut self, column: impl Into<String>, value: FilterValue) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: FilterValue) {
        self.columns.insert(column.into(), Some(value));
    }

    pub fn clear(&mut self, column: &str) {
        self.columns.remove(column);
    }

    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.columns.get(column).and_then(Option::as_ref)
    }

    /// Active `(column, value)` pairs.
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.columns
            .iter()
            .filter_map(|(column, value)| value.as_ref().map(|v| (column.as_str(), v)))
    }

    /// Overlays another state: its search (when set) and its column entries win.
    pub fn merge(&mut self, other: FilterState) {
        if other.search.is_some() {
            self.search = other.search;
        }
        self.columns.extend(other.columns);
    }
}

/// Whether `filter` excludes a row holding `value` in a column described by `column`.
///
/// `value` is `None` when the row does not carry the column at all, which counts as
/// null.
pub fn excludes(column: &ColumnSchema, value: Option<&Value>, filter: &FilterValue) -> bool {
    let control = column.control();
    if control == Control::None {
        return false;
    }

    if *filter == FilterValue::NoValue {
        return !value.map_or(true, Value::is_empty);
    }

    match (control, filter) {
        (Control::Slider, FilterValue::Range(min, max)) => {
            match value.and_then(Value::as_number) {
                Some(n) => n < *min || n > *max,
                None => true,
            }
        }
        (Control::Option, FilterValue::Option(wanted)) => match value.and_then(Value::as_text) {
            Some(text) => text.to_lowercase() != wanted.to_lowercase(),
            None => true,
        },
        (Control::MultiOption, FilterValue::AnyOf(wanted)) => {
            if wanted.is_empty() {
                return false;
            }
            let wanted: Vec<String> = wanted.iter().map(|w| w.to_lowercase()).collect();
            let items = value.and_then(Value::as_list).unwrap_or_default();
            !items
                .iter()
                .any(|item| wanted.contains(&item.to_lowercase()))
        }
        (Control::Checkbox, FilterValue::Checked(true)) => {
            value.and_then(Value::as_bool) != Some(true)
        }
        _ => false,
    }
}

/// Whether `row` passes every active filter in `state`. Filters on columns the schema
/// does not know impose nothing.
pub fn row_passes(row: &Row, schema: &Schema, state: &FilterState) -> bool {
    state.active().all(|(name, filter)| match schema.column(name) {
        Some(column) => !excludes(column, row.get(name), filter),
        None => true,
    })
}

/// Keeps the rows passing every active filter, preserving their order.
pub fn apply_filters<'a, I>(rows: I, schema: &Schema, state: &FilterState) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let kept: Vec<&Row> = rows
        .into_iter()
        .filter(|row| row_passes(row, schema, state))
        .collect();
    debug!(
        "Column filters kept {} rows ({} active filters)",
        kept.len(),
        state.active().count()
    );
    kept
}
