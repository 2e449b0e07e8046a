use crate::api::Catalog;
use crate::commands::CmdResult;
use crate::error::{CatalogError, Result};
use crate::facets::column_facets;
use crate::filter::FilterState;
use crate::model::{Control, Row};

/// Facets of `column`.
///
/// Option and checkbox choices count the rows that pass `state`. Slider bounds and
/// keyword choices always cover every row, so narrowing a range or picking a keyword
/// never hides the remaining choices.
pub fn run(catalog: &Catalog, column: &str, state: &FilterState) -> Result<CmdResult> {
    let unknown = || CatalogError::Api(format!("Unknown column: {}", column));
    let control = catalog.schema().column(column).ok_or_else(unknown)?.control();
    let rows: Vec<&Row> = match control {
        Control::Slider | Control::MultiOption => catalog.rows().iter().collect(),
        _ => catalog.view(state, None),
    };
    let facets = column_facets(catalog.schema(), &rows, column).ok_or_else(unknown)?;
    Ok(CmdResult::default().with_facets(column, facets))
}
