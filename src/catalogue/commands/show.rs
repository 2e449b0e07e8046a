use crate::api::Catalog;
use crate::commands::CmdResult;
use crate::error::{CatalogError, Result};
use crate::format::RecordDetail;

/// Detail of the record with the given id (its position in the data file).
pub fn run(catalog: &Catalog, id: usize, query: Option<&str>, doi_base: &str) -> Result<CmdResult> {
    let row = catalog
        .row(id)
        .ok_or_else(|| CatalogError::Api(format!("Record not found: {}", id)))?;
    let detail = RecordDetail::build(catalog.schema(), row, query, doi_base);
    Ok(CmdResult::default()
        .with_listed_rows(vec![row.clone()], catalog.len())
        .with_detail(detail))
}
