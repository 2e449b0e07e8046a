//! Display forms of field values: table cells, detail lines and DOI links.
//!
//! Only searchable columns are highlighted; every other column gets a `None` query and
//! renders as a single plain segment per line.

use crate::highlight::{highlight, MatchSegment};
use crate::model::{format_number, Row, Value};
use crate::schema::Schema;
use serde::Serialize;

/// Placeholder for a missing value in the detail view.
pub const MISSING: &str = "None";

fn bool_text(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// One-line text of a value for a table cell. Null values are empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Text(Some(text))) => text.clone(),
        Some(Value::Number(Some(n))) => format_number(*n),
        Some(Value::List(items)) => items.join(", "),
        Some(Value::Boolean(b)) => bool_text(*b).to_string(),
        _ => String::new(),
    }
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim)
}

/// Highlighted lines of a value for the detail view.
///
/// Text and numbers are split on newlines, lists get one `- element` line per element.
/// The [`MISSING`] placeholder is never highlighted.
pub fn format_field(value: Option<&Value>, query: Option<&str>) -> Vec<Vec<MatchSegment>> {
    let missing = || vec![vec![MatchSegment::Plain(MISSING.to_string())]];
    match value {
        Some(Value::Text(Some(text))) => split_lines(text).map(|l| highlight(query, l)).collect(),
        Some(Value::Number(Some(n))) => vec![highlight(query, &format_number(*n))],
        Some(Value::List(items)) if !items.is_empty() => items
            .iter()
            .flat_map(|item| split_lines(item))
            .map(|line| highlight(query, &format!("- {}", line)))
            .collect(),
        Some(Value::Boolean(b)) => vec![vec![MatchSegment::Plain(bool_text(*b).to_string())]],
        _ => missing(),
    }
}

/// Link to the record's DOI, when the DOI column holds a value.
pub fn doi_link(base: &str, value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_text)
        .map(|doi| format!("{}{}", base, doi))
}

fn row_link(schema: &Schema, row: &Row, base: &str) -> Option<String> {
    schema
        .doi_column()
        .and_then(|column| doi_link(base, row.get(column)))
}

fn query_for<'q>(schema: &Schema, column: &str, query: Option<&'q str>) -> Option<&'q str> {
    match schema.column(column) {
        Some(col) if col.searchable => query,
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailField {
    pub column: String,
    pub lines: Vec<Vec<MatchSegment>>,
}

/// Everything the detail view of one record shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDetail {
    pub id: usize,
    pub title: Vec<MatchSegment>,
    pub fields: Vec<DetailField>,
    pub link: Option<String>,
}

impl RecordDetail {
    /// Builds the detail of `row`. The title and DOI columns are shown as the heading
    /// and the link, never as fields.
    pub fn build(schema: &Schema, row: &Row, query: Option<&str>, doi_base: &str) -> Self {
        let title_column = schema.title_column();
        let title = title_column
            .map(|column| {
                let q = query_for(schema, column, query);
                highlight(q, &cell_text(row.get(column)))
            })
            .unwrap_or_default();

        let fields = schema
            .popup_columns()
            .iter()
            .filter(|column| Some(column.as_str()) != title_column)
            .filter(|column| Some(column.as_str()) != schema.doi_column())
            .map(|column| DetailField {
                column: column.clone(),
                lines: format_field(row.get(column), query_for(schema, column, query)),
            })
            .collect();

        Self {
            id: row.id,
            title,
            fields,
            link: row_link(schema, row, doi_base),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: usize,
    pub cells: Vec<Vec<MatchSegment>>,
    pub link: Option<String>,
}

/// The table of a row view: one column per table column, plus a link per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn build(schema: &Schema, rows: &[&Row], query: Option<&str>, doi_base: &str) -> Self {
        let columns = schema.table_columns();
        let rows = rows
            .iter()
            .map(|row| TableRow {
                id: row.id,
                cells: columns
                    .iter()
                    .map(|column| {
                        highlight(query_for(schema, column, query), &cell_text(row.get(column)))
                    })
                    .collect(),
                link: row_link(schema, row, doi_base),
            })
            .collect();

        Self {
            headers: columns.to_vec(),
            rows,
        }
    }

    pub fn has_links(&self) -> bool {
        self.rows.iter().any(|row| row.link.is_some())
    }
}
