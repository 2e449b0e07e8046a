//! # Type Coercion
//!
//! Converts raw string records into typed [`Row`]s following the schema. The load fails
//! only when a data column has no metadata; individual values never fail. A malformed
//! number becomes null and any unrecognised boolean text is truthy.
//!
//! ## Nullish values
//!
//! A raw value is *nullish* when it is absent, or when trimmed and lower-cased it is
//! `""`, `"none"` or `"null"`. Nullish values become `Text(None)`, `Number(None)`, an
//! empty list, or `false`, depending on the column type.

use crate::error::CoercionError;
use crate::model::{Row, Value, ValueType};
use crate::schema::Schema;
use crate::table::{RawRecord, RawTable};
use log::debug;

const NULLISH: [&str; 3] = ["", "none", "null"];

pub fn is_nullish(raw: Option<&str>) -> bool {
    match raw {
        None => true,
        Some(s) => {
            let lowered = s.trim().to_lowercase();
            NULLISH.contains(&lowered.as_str())
        }
    }
}

/// Coerces a single raw value to the given type.
pub fn coerce_value(raw: Option<&str>, value_type: ValueType) -> Value {
    match value_type {
        ValueType::Text => Value::Text(coerce_text(raw)),
        ValueType::Number => Value::Number(coerce_number(raw)),
        ValueType::List => Value::List(coerce_list(raw)),
        ValueType::Boolean => Value::Boolean(coerce_bool(raw)),
    }
}

fn coerce_text(raw: Option<&str>) -> Option<String> {
    if is_nullish(raw) {
        return None;
    }
    raw.map(|s| s.trim().to_string())
}

fn coerce_number(raw: Option<&str>) -> Option<f64> {
    if is_nullish(raw) {
        return None;
    }
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

fn coerce_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) if !is_nullish(raw) => s
            .split(',')
            .map(str::trim)
            .filter(|item| !is_nullish(Some(item)))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn coerce_bool(raw: Option<&str>) -> bool {
    let Some(s) = raw.filter(|_| !is_nullish(raw)) else {
        return false;
    };
    let trimmed = s.trim();

    if let Ok(n) = trimmed.parse::<i64>() {
        return n != 0;
    }
    // Decimal text counts by its integer part, so "0.5" is false.
    if let Some(n) = trimmed.parse::<f64>().ok().filter(|n| n.is_finite()) {
        return n.trunc() != 0.0;
    }

    !matches!(trimmed.to_lowercase().as_str(), "false" | "no")
}

/// Coerces one raw record. Columns the schema does not know are skipped, columns the
/// record does not carry are coerced from an absent value.
pub fn coerce_record(schema: &Schema, columns: &[String], id: usize, record: &RawRecord) -> Row {
    let mut row = Row::new(id);
    for column in columns {
        if let Some(col) = schema.column(column) {
            row.values.insert(
                column.clone(),
                coerce_value(record.get(column), col.value_type()),
            );
        }
    }
    row
}

/// Coerces every record of `data`, assigning ids in source order.
///
/// Fails when any data column is missing from the schema; extra schema columns that
/// the data does not carry are fine.
pub fn coerce_rows(schema: &Schema, data: &RawTable) -> Result<Vec<Row>, CoercionError> {
    let unmapped: Vec<String> = data
        .columns()
        .iter()
        .filter(|column| !schema.contains(column))
        .cloned()
        .collect();
    if !unmapped.is_empty() {
        return Err(CoercionError::UnmappedColumns(unmapped));
    }

    let rows: Vec<Row> = data
        .records()
        .iter()
        .enumerate()
        .map(|(id, record)| coerce_record(schema, data.columns(), id, record))
        .collect();

    debug!("Coerced {} rows over {} columns", rows.len(), data.columns().len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{papers_rows, papers_schema};

    #[test]
    fn nullish_detection() {
        assert!(is_nullish(None));
        assert!(is_nullish(Some("")));
        assert!(is_nullish(Some("   ")));
        assert!(is_nullish(Some(" None ")));
        assert!(is_nullish(Some("NULL")));
        assert!(!is_nullish(Some("nil")));
        assert!(!is_nullish(Some("0")));
    }

    #[test]
    fn text_is_trimmed_or_null() {
        assert_eq!(
            coerce_value(Some("  Gorilla "), ValueType::Text),
            Value::Text(Some("Gorilla".into()))
        );
        assert_eq!(coerce_value(Some("none"), ValueType::Text), Value::Text(None));
        assert_eq!(coerce_value(None, ValueType::Text), Value::Text(None));
    }

    #[test]
    fn lists_split_trim_and_drop_nullish_items() {
        assert_eq!(
            coerce_value(Some("Blind, Low Vision"), ValueType::List),
            Value::List(vec!["Blind".into(), "Low Vision".into()])
        );
        assert_eq!(
            coerce_value(Some("a,, none ,b,"), ValueType::List),
            Value::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(coerce_value(Some("null"), ValueType::List), Value::List(vec![]));
        assert_eq!(coerce_value(None, ValueType::List), Value::List(vec![]));
    }

    #[test]
    fn booleans_are_permissive() {
        let b = |raw: &str| coerce_value(Some(raw), ValueType::Boolean);
        assert_eq!(b("1"), Value::Boolean(true));
        assert_eq!(b(" 0 "), Value::Boolean(false));
        assert_eq!(b("-2"), Value::Boolean(true));
        assert_eq!(b("0.5"), Value::Boolean(false));
        assert_eq!(b("False"), Value::Boolean(false));
        assert_eq!(b(" NO "), Value::Boolean(false));
        assert_eq!(b("true"), Value::Boolean(true));
        assert_eq!(b("yes"), Value::Boolean(true));
        assert_eq!(b("garbage"), Value::Boolean(true));
        assert_eq!(b("none"), Value::Boolean(false));
        assert_eq!(coerce_value(None, ValueType::Boolean), Value::Boolean(false));
    }

    #[test]
    fn numbers_parse_or_degrade_to_null() {
        let n = |raw: &str| coerce_value(Some(raw), ValueType::Number);
        assert_eq!(n("2010"), Value::Number(Some(2010.0)));
        assert_eq!(n(" 3.25 "), Value::Number(Some(3.25)));
        assert_eq!(n(""), Value::Number(None));
        assert_eq!(n("not a number"), Value::Number(None));
        assert_eq!(n("inf"), Value::Number(None));
        assert_eq!(n("NaN"), Value::Number(None));
        // No numeric-prefix reading.
        assert_eq!(n("2010s"), Value::Number(None));
        assert_eq!(n("12 pages"), Value::Number(None));
    }

    #[test]
    fn rows_get_source_order_ids() {
        let (_, rows) = papers_rows();
        let ids: Vec<usize> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(rows[0].get("Year"), Some(&Value::Number(Some(2010.0))));
        assert_eq!(rows[1].get("Year"), Some(&Value::Number(None)));
        assert_eq!(rows[2].get("Year"), Some(&Value::Number(None)));
        assert_eq!(rows[1].get("Abstract"), Some(&Value::Text(None)));
        assert_eq!(rows[0].get("Empirical"), Some(&Value::Boolean(true)));
        assert_eq!(rows[2].get("Empirical"), Some(&Value::Boolean(false)));
    }

    #[test]
    fn unmapped_data_columns_fail_the_load() {
        let schema = papers_schema();
        let data = RawTable::from_rows(["Title", "Pages", "Authors"], &[&["x", "1", "y"]]);
        let err = coerce_rows(&schema, &data).unwrap_err();
        assert_eq!(
            err,
            CoercionError::UnmappedColumns(vec!["Pages".into(), "Authors".into()])
        );
    }

    #[test]
    fn schema_columns_absent_from_data_are_tolerated() {
        let schema = papers_schema();
        let data = RawTable::from_rows(["Title"], &[&["Only a title"]]);
        let rows = coerce_rows(&schema, &data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Year"), None);
    }

    #[test]
    fn recoercing_serialized_rows_is_idempotent() {
        let (schema, rows) = papers_rows();
        for row in &rows {
            let record: RawRecord = row.to_raw_record().into_iter().collect();
            let columns: Vec<String> = row.values.keys().cloned().collect();
            let again = coerce_record(&schema, &columns, row.id, &record);
            assert_eq!(&again, row);
        }
    }
}
