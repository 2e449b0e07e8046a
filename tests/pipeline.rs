//! End-to-end checks of the library pipeline: CSV text in, ordered rows out.

use catalogue::api::Catalog;
use catalogue::coerce::coerce_value;
use catalogue::error::{CatalogError, CoercionError, SchemaError};
use catalogue::filter::{FilterState, FilterValue};
use catalogue::loader::read_table;
use catalogue::model::{Row, Value, ValueType};
use catalogue::sort::{compare_values, normalize_sort_key, SortSpec};
use std::cmp::Ordering;

const METADATA: &str = "\
Column Name,Filter Label,Explanation,Role,Type,UI Control,Searchable,Display in Table,Display in Popup
Title,Title,Paper title,TITLE,TEXT,NONE,YES,YES,YES
Year,Year,Publication year,,NUMBER,SLIDER,,YES,YES
Venue,Venue,Conference,,TEXT,OPTION,,YES,YES
Topics,Topics,Target users,,LIST,MULTIOPTION,YES,YES,YES
Empirical,Empirical,Has a user study,,BOOLEAN,CHECKBOX,,,YES
Abstract,Abstract,Summary,,TEXT,NONE,YES,,YES
DOI,DOI,Identifier,DOI,TEXT,NONE,,YES,YES
";

const DATA: &str = "\
Title,Year,Venue,Topics,Empirical,Abstract,DOI
The Gorilla Study,2010,CHI,\"Blind, Low Vision\",yes,Accessibility of charts,10.1000/a
Accessible Maps,,VIS,blind,0,none,
A Survey of Sonification,not a number,chi,,no,Sound based access,10.1000/c
Tactile Graphics,2018,,\"Low Vision, Sighted\",1,,10.1000/d
";

fn load(metadata: &str, data: &str) -> Result<Catalog, CatalogError> {
    let metadata = read_table(metadata.as_bytes())?;
    let data = read_table(data.as_bytes())?;
    Catalog::from_tables(&metadata, &data)
}

fn catalog() -> Catalog {
    load(METADATA, DATA).unwrap()
}

fn ids(rows: &[&Row]) -> Vec<usize> {
    rows.iter().map(|row| row.id).collect()
}

fn view(catalog: &Catalog, state: &FilterState, sort: Option<&SortSpec>) -> Vec<usize> {
    ids(&catalog.view(state, sort))
}

#[test]
fn year_values_coerce_and_slider_keeps_in_range_rows() {
    let catalog = catalog();
    let years: Vec<Option<f64>> = catalog
        .rows()
        .iter()
        .map(|row| row.get("Year").and_then(Value::as_number))
        .collect();
    assert_eq!(years, vec![Some(2010.0), None, None, Some(2018.0)]);

    let state = FilterState::new().with("Year", FilterValue::Range(2005.0, 2015.0));
    assert_eq!(view(&catalog, &state, None), vec![0]);
}

#[test]
fn multioption_matches_case_insensitively() {
    let catalog = catalog();
    assert_eq!(
        catalog.rows()[0].get("Topics"),
        Some(&Value::List(vec!["Blind".into(), "Low Vision".into()]))
    );

    let state = FilterState::new().with("Topics", FilterValue::AnyOf(vec!["low vision".into()]));
    assert_eq!(view(&catalog, &state, None), vec![0, 3]);
}

#[test]
fn search_is_a_case_insensitive_substring_match() {
    let catalog = catalog();
    let state = FilterState::new().with_search("acces");
    assert_eq!(view(&catalog, &state, None), vec![0, 1, 2]);

    let state = FilterState::new().with_search("charts");
    assert_eq!(view(&catalog, &state, None), vec![0]);
}

#[test]
fn empty_state_keeps_every_row_in_source_order() {
    let catalog = catalog();
    assert_eq!(view(&catalog, &FilterState::new(), None), vec![0, 1, 2, 3]);
    assert_eq!(
        view(&catalog, &FilterState::new().with_search("  "), None),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn filters_combine_conjunctively() {
    let catalog = catalog();
    let state = FilterState::new()
        .with("Empirical", FilterValue::Checked(true))
        .with("Topics", FilterValue::AnyOf(vec!["low vision".into()]));
    assert_eq!(view(&catalog, &state, None), vec![0, 3]);

    let state = state.with("Year", FilterValue::Range(2005.0, 2015.0));
    assert_eq!(view(&catalog, &state, None), vec![0]);
}

#[test]
fn no_value_sentinel_keeps_only_empty_fields() {
    let catalog = catalog();
    let state = FilterState::new().with("Venue", FilterValue::NoValue);
    assert_eq!(view(&catalog, &state, None), vec![3]);

    let state = FilterState::new().with("Topics", FilterValue::NoValue);
    assert_eq!(view(&catalog, &state, None), vec![2]);
}

#[test]
fn option_filter_ignores_case() {
    let catalog = catalog();
    let state = FilterState::new().with("Venue", FilterValue::Option("CHI".into()));
    assert_eq!(view(&catalog, &state, None), vec![0, 2]);
}

#[test]
fn sorting_is_type_aware() {
    let catalog = catalog();
    let state = FilterState::new();
    assert_eq!(
        view(&catalog, &state, Some(&SortSpec::ascending("Title"))),
        vec![1, 0, 2, 3]
    );
    assert_eq!(
        view(&catalog, &state, Some(&SortSpec::descending("Year"))),
        vec![3, 0, 1, 2]
    );

    let short = Value::List(vec!["Blind".into()]);
    let long = Value::List(vec!["blind".into(), "Low Vision".into()]);
    assert_eq!(
        compare_values(Some(&short), Some(&long), ValueType::List),
        Ordering::Less
    );
    assert_eq!(normalize_sort_key("The Gorilla"), "gorilla");
}

#[test]
fn coercion_is_idempotent_through_raw_form() {
    let catalog = catalog();
    for row in catalog.rows() {
        for (column, value) in &row.values {
            let value_type = catalog.schema().column(column).unwrap().value_type();
            let again = coerce_value(value.to_raw().as_deref(), value_type);
            assert_eq!(&again, value, "{} of row {}", column, row.id);
        }
    }
}

#[test]
fn illegal_control_fails_the_load() {
    let metadata = METADATA.replace(
        "Year,Year,Publication year,,NUMBER,SLIDER",
        "Year,Year,Publication year,,TEXT,SLIDER",
    );
    let err = load(&metadata, DATA).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Schema(SchemaError::ControlMismatch { .. })
    ));
}

#[test]
fn missing_metadata_field_fails_the_load() {
    let metadata = "Column Name,Type\nTitle,TEXT\n";
    let err = load(metadata, "Title\nA\n").unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Schema(SchemaError::MissingFields(_))
    ));
}

#[test]
fn data_column_without_metadata_fails_the_load() {
    let data = "Title,Pages\nA,10\n";
    let err = load(METADATA, data).unwrap_err();
    match err {
        CatalogError::Coercion(CoercionError::UnmappedColumns(columns)) => {
            assert_eq!(columns, vec!["Pages".to_string()])
        }
        other => panic!("unexpected error: {}", other),
    }
}
