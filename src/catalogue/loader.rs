//! CSV input for the metadata and data tables.
//!
//! The first record is the header. Records may be shorter or longer than the header:
//! missing trailing fields are left absent and surplus fields are ignored. Cells are
//! kept exactly as written; trimming is up to coercion.

use crate::error::Result;
use crate::table::RawTable;
use csv::ReaderBuilder;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let mut table = RawTable::new(headers.iter());
    for record in csv.records() {
        let record = record?;
        table.push_positional(record.iter());
    }
    Ok(table)
}

pub fn read_table_path(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    let table = read_table(file)?;
    debug!(
        "Read {} records with {} columns from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}
