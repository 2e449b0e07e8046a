//! Free-text search over the searchable columns.
//!
//! A row matches when any searchable TEXT value, or any element of a searchable LIST
//! value, contains the query case-insensitively. Other column types never match. A
//! nullish query matches every row.

use crate::coerce::is_nullish;
use crate::model::{Row, Value};
use crate::schema::Schema;
use log::debug;

/// Lower-cased query, or `None` when the query is nullish and searching is a no-op.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    if is_nullish(query) {
        None
    } else {
        query.map(str::to_lowercase)
    }
}

fn value_contains(value: &Value, needle: &str) -> bool {
    match value {
        Value::Text(Some(text)) => text.to_lowercase().contains(needle),
        Value::List(items) => items.iter().any(|item| item.to_lowercase().contains(needle)),
        _ => false,
    }
}

/// Whether `row` matches an already normalized query.
pub fn row_matches(row: &Row, schema: &Schema, needle: &str) -> bool {
    schema
        .searchable_columns()
        .iter()
        .filter_map(|column| row.get(column))
        .any(|value| value_contains(value, needle))
}

/// Keeps the rows matching `query`, preserving their order.
pub fn apply_search<'a, I>(rows: I, schema: &Schema, query: Option<&str>) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let Some(needle) = normalize_query(query) else {
        return rows.into_iter().collect();
    };

    let matched: Vec<&Row> = rows
        .into_iter()
        .filter(|row| row_matches(row, schema, &needle))
        .collect();
    debug!("Search '{}' matched {} rows", needle, matched.len());
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce_rows;
    use crate::schema::compile_schema;
    use crate::table::RawTable;
    use crate::test_utils::{ids, metadata_table, papers_rows};

    fn run(query: Option<&str>) -> Vec<usize> {
        let (schema, rows) = papers_rows();
        ids(&apply_search(&rows, &schema, query))
    }

    #[test]
    fn nullish_query_matches_everything() {
        assert_eq!(run(None), vec![0, 1, 2, 3]);
        assert_eq!(run(Some("")), vec![0, 1, 2, 3]);
        assert_eq!(run(Some("  none ")), vec![0, 1, 2, 3]);
    }

    #[test]
    fn text_matching_is_case_insensitive_substring() {
        // Abstract "Accessibility of charts", title "Accessible Maps", abstract "Sound based access"
        assert_eq!(run(Some("acces")), vec![0, 1, 2]);
        assert_eq!(run(Some("GORILLA")), vec![0]);
    }

    #[test]
    fn list_elements_match_individually() {
        assert_eq!(run(Some("sight")), vec![3]);
        assert_eq!(run(Some("vision")), vec![0, 3]);
    }

    #[test]
    fn non_searchable_and_non_text_columns_never_match() {
        // Venue and DOI are not searchable, Year is a number.
        assert_eq!(run(Some("vis")), vec![0, 3]);
        assert!(run(Some("10.1000")).is_empty());
        assert!(run(Some("2010")).is_empty());
    }

    #[test]
    fn searchable_numbers_and_booleans_never_match() {
        let metadata = metadata_table(&[
            &["Title", "Title", "", "TITLE", "TEXT", "NONE", "", "YES", "YES"],
            &["Year", "Year", "", "", "NUMBER", "SLIDER", "YES", "YES", "YES"],
            &["Empirical", "Empirical", "", "", "BOOLEAN", "CHECKBOX", "YES", "", "YES"],
        ]);
        let schema = compile_schema(&metadata).unwrap();
        assert_eq!(
            schema.searchable_columns(),
            &["Year".to_string(), "Empirical".to_string()]
        );

        let data = RawTable::from_rows(
            ["Title", "Year", "Empirical"],
            &[&["2010 true", "2010", "true"], &["B", "2018", "yes"]],
        );
        let rows = coerce_rows(&schema, &data).unwrap();
        assert!(apply_search(&rows, &schema, Some("2010")).is_empty());
        assert!(apply_search(&rows, &schema, Some("true")).is_empty());
        assert!(apply_search(&rows, &schema, Some("2018")).is_empty());
    }

    #[test]
    fn null_text_never_matches() {
        let (schema, rows) = papers_rows();
        // Row 1's abstract was coerced to null and must not match as the text "null".
        assert!(!row_matches(&rows[1], &schema, "null"));
    }
}
