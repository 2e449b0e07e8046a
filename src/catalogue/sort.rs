//! # Row Ordering
//!
//! Rows are ordered by one column, compared according to the column's type:
//!
//! - TEXT values are compared by their [sort key](normalize_sort_key), so "The Gorilla"
//!   sorts next to "Gorilla" and leading punctuation is ignored.
//! - LIST values have each element normalized, the elements sorted, and the two
//!   sequences compared element by element. A sequence that is a prefix of the other
//!   sorts first.
//! - NUMBER values compare numerically, with nulls grouped before every number.
//! - BOOLEAN values order `false` before `true`.
//!
//! Sorting is always stable: rows that compare equal keep their relative order, and
//! sorting without a column keeps the original order.

use crate::model::{Row, Value, ValueType};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const DETERMINERS: [&str; 3] = ["a ", "an ", "the "];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    /// The direction a column header toggles to when clicked again.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    #[serde(default)]
    pub direction: Direction,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }

    /// Next sort after a click on `column`: flip direction on the same column,
    /// otherwise start ascending on the new one.
    pub fn toggle(current: Option<&SortSpec>, column: &str) -> SortSpec {
        match current {
            Some(spec) if spec.column == column => SortSpec {
                column: spec.column.clone(),
                direction: spec.direction.toggled(),
            },
            _ => SortSpec::ascending(column),
        }
    }
}

/// Sort key for text: trimmed, lower-cased, one leading determiner removed, then any
/// leading characters other than ASCII letters and digits removed.
pub fn normalize_sort_key(s: &str) -> String {
    let lowered = s.trim().to_lowercase();
    let mut key = lowered.as_str();
    if let Some(rest) = DETERMINERS.iter().find_map(|d| key.strip_prefix(d)) {
        key = rest;
    }
    key.trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_string()
}

fn compare_lists(a: &[String], b: &[String]) -> Ordering {
    let mut left: Vec<String> = a.iter().map(|s| normalize_sort_key(s)).collect();
    let mut right: Vec<String> = b.iter().map(|s| normalize_sort_key(s)).collect();
    left.sort();
    right.sort();
    // Slice ordering is element-wise with the shorter prefix first.
    left.cmp(&right)
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

/// Ascending comparison of two values of the given type.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, value_type: ValueType) -> Ordering {
    match value_type {
        ValueType::Text => {
            let key = |v: Option<&Value>| {
                normalize_sort_key(v.and_then(Value::as_text).unwrap_or_default())
            };
            key(a).cmp(&key(b))
        }
        ValueType::List => compare_lists(
            a.and_then(Value::as_list).unwrap_or_default(),
            b.and_then(Value::as_list).unwrap_or_default(),
        ),
        ValueType::Number => {
            compare_numbers(a.and_then(Value::as_number), b.and_then(Value::as_number))
        }
        ValueType::Boolean => {
            let flag = |v: Option<&Value>| v.and_then(Value::as_bool).unwrap_or(false);
            flag(a).cmp(&flag(b))
        }
    }
}

pub fn compare_rows(
    a: &Row,
    b: &Row,
    column: &str,
    value_type: ValueType,
    direction: Direction,
) -> Ordering {
    direction.apply(compare_values(a.get(column), b.get(column), value_type))
}

/// Stable in-place sort of a row view. No spec, or a column the schema does not know,
/// leaves the order untouched.
pub fn sort_rows(rows: &mut [&Row], schema: &Schema, spec: Option<&SortSpec>) {
    let Some(spec) = spec else {
        return;
    };
    let Some(column) = schema.column(&spec.column) else {
        return;
    };
    let value_type = column.value_type();
    rows.sort_by(|a, b| compare_rows(a, b, &spec.column, value_type, spec.direction));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ids, papers_rows};

    fn row_with(id: usize, column: &str, value: Value) -> Row {
        let mut row = Row::new(id);
        row.values.insert(column.to_string(), value);
        row
    }

    fn list(items: &[&str]) -> Value {
        Value::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn determiners_and_leading_punctuation_are_ignored() {
        assert_eq!(normalize_sort_key("The Gorilla"), "gorilla");
        assert_eq!(normalize_sort_key("Gorilla"), "gorilla");
        assert_eq!(normalize_sort_key("  An Apple "), "apple");
        assert_eq!(normalize_sort_key("A \"Quoted\" title"), "quoted\" title");
        assert_eq!(normalize_sort_key("...42 things"), "42 things");
        assert_eq!(normalize_sort_key("Theory"), "theory");
        assert_eq!(normalize_sort_key("a"), "a");
    }

    #[test]
    fn only_one_determiner_is_stripped() {
        assert_eq!(normalize_sort_key("The A Team"), "a team");
    }

    #[test]
    fn shorter_matching_list_sorts_first() {
        let a = row_with(0, "Topics", list(&["Blind"]));
        let b = row_with(1, "Topics", list(&["blind", "Low Vision"]));
        let asc = Direction::Ascending;
        assert_eq!(compare_rows(&a, &b, "Topics", ValueType::List, asc), Ordering::Less);
        assert_eq!(compare_rows(&b, &a, "Topics", ValueType::List, asc), Ordering::Greater);
    }

    #[test]
    fn lists_are_sorted_before_comparison() {
        let a = row_with(0, "Topics", list(&["Sighted", "Blind"]));
        let b = row_with(1, "Topics", list(&["blind", "sighted"]));
        assert_eq!(
            compare_rows(&a, &b, "Topics", ValueType::List, Direction::Ascending),
            Ordering::Equal
        );
        let empty_a = row_with(2, "Topics", list(&[]));
        let empty_b = row_with(3, "Topics", list(&[]));
        assert_eq!(
            compare_rows(&empty_a, &empty_b, "Topics", ValueType::List, Direction::Ascending),
            Ordering::Equal
        );
        assert_eq!(
            compare_rows(&empty_a, &a, "Topics", ValueType::List, Direction::Ascending),
            Ordering::Less
        );
    }

    #[test]
    fn null_numbers_group_before_values() {
        let null_a = row_with(0, "Year", Value::Number(None));
        let null_b = row_with(1, "Year", Value::Number(None));
        let year = row_with(2, "Year", Value::Number(Some(1999.0)));
        let asc = Direction::Ascending;
        assert_eq!(compare_rows(&null_a, &null_b, "Year", ValueType::Number, asc), Ordering::Equal);
        assert_eq!(compare_rows(&null_a, &year, "Year", ValueType::Number, asc), Ordering::Less);
        assert_eq!(
            compare_rows(&null_a, &year, "Year", ValueType::Number, Direction::Descending),
            Ordering::Greater
        );
    }

    #[test]
    fn booleans_order_false_first() {
        let no = row_with(0, "Empirical", Value::Boolean(false));
        let yes = row_with(1, "Empirical", Value::Boolean(true));
        assert_eq!(
            compare_rows(&no, &yes, "Empirical", ValueType::Boolean, Direction::Ascending),
            Ordering::Less
        );
    }

    #[test]
    fn sorts_titles_by_normalized_key() {
        let (schema, rows) = papers_rows();
        let mut view: Vec<&Row> = rows.iter().collect();
        sort_rows(&mut view, &schema, Some(&SortSpec::ascending("Title")));
        // accessible, gorilla, survey, tactile
        assert_eq!(ids(&view), vec![1, 0, 2, 3]);

        sort_rows(&mut view, &schema, Some(&SortSpec::descending("Title")));
        assert_eq!(ids(&view), vec![3, 2, 0, 1]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let (schema, rows) = papers_rows();
        let mut view: Vec<&Row> = rows.iter().collect();
        sort_rows(&mut view, &schema, Some(&SortSpec::ascending("Year")));
        // Rows 1 and 2 are both null and keep their order.
        assert_eq!(ids(&view), vec![1, 2, 0, 3]);
    }

    #[test]
    fn missing_or_unknown_sort_column_keeps_order() {
        let (schema, rows) = papers_rows();
        let mut view: Vec<&Row> = rows.iter().rev().collect();
        sort_rows(&mut view, &schema, None);
        assert_eq!(ids(&view), vec![3, 2, 1, 0]);
        sort_rows(&mut view, &schema, Some(&SortSpec::ascending("Pages")));
        assert_eq!(ids(&view), vec![3, 2, 1, 0]);
    }

    #[test]
    fn toggling_flips_direction_on_same_column() {
        let first = SortSpec::toggle(None, "Year");
        assert_eq!(first, SortSpec::ascending("Year"));
        let second = SortSpec::toggle(Some(&first), "Year");
        assert_eq!(second.direction, Direction::Descending);
        let other = SortSpec::toggle(Some(&second), "Title");
        assert_eq!(other, SortSpec::ascending("Title"));
    }
}
