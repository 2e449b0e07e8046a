//! The displayed row set: search, then column filters, then sort.

use crate::filter::{apply_filters, FilterState};
use crate::model::Row;
use crate::schema::Schema;
use crate::search::apply_search;
use crate::sort::{sort_rows, SortSpec};
use log::debug;

/// Computes the rows to display for the current inputs.
///
/// Pure: the inputs are never modified, and equal inputs give equal results. An empty
/// state with no sort returns every row in source order.
pub fn compute_view<'a>(
    rows: &'a [Row],
    schema: &Schema,
    state: &FilterState,
    sort: Option<&SortSpec>,
) -> Vec<&'a Row> {
    let searched = apply_search(rows, schema, state.search.as_deref());
    let mut view = apply_filters(searched, schema, state);
    sort_rows(&mut view, schema, sort);
    debug!("View recomputed: {} of {} rows", view.len(), rows.len());
    view
}
