//! Fixtures shared by unit tests: a small research-papers dataset.

use crate::coerce::coerce_rows;
use crate::model::Row;
use crate::schema::{compile_schema, Schema, METADATA_FIELDS};
use crate::table::RawTable;

/// Builds a metadata table with the full set of metadata fields.
pub fn metadata_table(rows: &[&[&str]]) -> RawTable {
    RawTable::from_rows(METADATA_FIELDS, rows)
}

pub fn papers_metadata() -> RawTable {
    metadata_table(&[
        &["Title", "Title", "Paper title", "TITLE", "TEXT", "NONE", "YES", "YES", "YES"],
        &["Year", "Year", "Publication year", "", "NUMBER", "SLIDER", "", "YES", "YES"],
        &["Venue", "Venue", "Conference", "", "TEXT", "OPTION", "", "YES", "YES"],
        &["Topics", "Topics", "Target users", "", "LIST", "MULTIOPTION", "YES", "YES", "YES"],
        &["Empirical", "Empirical", "Has a user study", "", "BOOLEAN", "CHECKBOX", "", "", "YES"],
        &["Abstract", "Abstract", "Summary", "", "TEXT", "NONE", "YES", "", "YES"],
        &["DOI", "DOI", "Identifier", "DOI", "TEXT", "NONE", "", "YES", "YES"],
    ])
}

pub const PAPER_COLUMNS: [&str; 7] = [
    "Title",
    "Year",
    "Venue",
    "Topics",
    "Empirical",
    "Abstract",
    "DOI",
];

pub fn papers_data() -> RawTable {
    RawTable::from_rows(
        PAPER_COLUMNS,
        &[
            &[
                "The Gorilla Study",
                "2010",
                "CHI",
                "Blind, Low Vision",
                "yes",
                "Accessibility of charts",
                "10.1000/a",
            ],
            &["Accessible Maps", "", "VIS", "blind", "0", "none", ""],
            &[
                "A Survey of Sonification",
                "not a number",
                "chi",
                "",
                "no",
                "Sound based access",
                "10.1000/c",
            ],
            &[
                "Tactile Graphics",
                "2018",
                "",
                "Low Vision, Sighted",
                "1",
                "",
                "10.1000/d",
            ],
        ],
    )
}

pub fn papers_schema() -> Schema {
    compile_schema(&papers_metadata()).expect("fixture metadata compiles")
}

pub fn papers_rows() -> (Schema, Vec<Row>) {
    let schema = papers_schema();
    let rows = coerce_rows(&schema, &papers_data()).expect("fixture data coerces");
    (schema, rows)
}

/// Ids of a row view, for compact assertions.
pub fn ids(rows: &[&Row]) -> Vec<usize> {
    rows.iter().map(|row| row.id).collect()
}
