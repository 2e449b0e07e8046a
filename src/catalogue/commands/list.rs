use crate::api::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::filter::FilterState;
use crate::format::TableView;
use crate::sort::SortSpec;

pub fn run(
    catalog: &Catalog,
    state: &FilterState,
    sort: Option<&SortSpec>,
    doi_base: &str,
) -> Result<CmdResult> {
    let schema = catalog.schema();
    if let Some(spec) = sort {
        if !schema.contains(&spec.column) {
            return Err(CatalogError::Api(format!(
                "Unknown sort column: {}",
                spec.column
            )));
        }
    }

    let view = catalog.view(state, sort);
    let table = TableView::build(schema, &view, state.search.as_deref(), doi_base);
    let rows = view.into_iter().cloned().collect();

    let mut result = CmdResult::default()
        .with_listed_rows(rows, catalog.len())
        .with_table(table);
    for (column, _) in state.active() {
        if !schema.contains(column) {
            result.add_message(CmdMessage::warning(format!(
                "Ignoring filter on unknown column: {}",
                column
            )));
        }
    }
    Ok(result)
}
