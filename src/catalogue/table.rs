//! Raw tables as handed over by a loader.
//!
//! Both the metadata and the data arrive as a header plus records of optional strings.
//! A field that the source did not carry at all is absent; an empty cell is `Some("")`.
//! Coercion treats both the same way (see [`crate::coerce::is_nullish`]).

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// A headered table of raw string records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    records: Vec<RawRecord>,
}

impl RawTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    /// Builds a table from positional rows. Short rows leave trailing columns absent and
    /// surplus cells are dropped.
    pub fn from_rows<I, S>(columns: I, rows: &[&[&str]]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_positional(row.iter().copied());
        }
        table
    }

    pub fn push(&mut self, record: RawRecord) {
        self.records.push(record);
    }

    pub fn push_positional<'a, I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let record = self
            .columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| (column.clone(), cell.to_string()))
            .collect();
        self.records.push(record);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
