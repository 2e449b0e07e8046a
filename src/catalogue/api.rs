//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all catalogue operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Loads** a [`Catalog`] from a metadata table and a data table
//! - **Dispatches** to the appropriate command function
//! - **Applies configuration** (DOI link base, default sort)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs` and the core modules
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Sharing
//!
//! A [`Catalog`] never changes after it is built. The API holds it behind an [`Arc`] so
//! other readers (threads, other views) can share it without copying rows.

use crate::coerce::coerce_rows;
use crate::commands;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::filter::FilterState;
use crate::loader::read_table_path;
use crate::model::Row;
use crate::schema::{compile_schema, Schema};
use crate::sort::SortSpec;
use crate::table::RawTable;
use crate::view::compute_view;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// A compiled schema together with its coerced rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    schema: Schema,
    rows: Vec<Row>,
}

impl Catalog {
    pub fn new(schema: Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    /// Compiles `metadata` and coerces `data` against it.
    pub fn from_tables(metadata: &RawTable, data: &RawTable) -> Result<Self> {
        let schema = compile_schema(metadata)?;
        let rows = coerce_rows(&schema, data)?;
        info!(
            "Loaded {} records over {} columns",
            rows.len(),
            schema.len()
        );
        Ok(Self::new(schema, rows))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: usize) -> Option<&Row> {
        self.rows.get(id)
    }

    pub fn view(&self, state: &FilterState, sort: Option<&SortSpec>) -> Vec<&Row> {
        compute_view(&self.rows, &self.schema, state, sort)
    }
}

/// The main API facade for catalogue operations.
pub struct CatalogApi {
    catalog: Arc<Catalog>,
    config: CatalogConfig,
}

impl CatalogApi {
    pub fn new(catalog: Arc<Catalog>, config: CatalogConfig) -> Self {
        Self { catalog, config }
    }

    /// Reads both CSV files and builds the catalog.
    pub fn load(metadata: &Path, data: &Path, config: CatalogConfig) -> Result<Self> {
        let metadata = read_table_path(metadata)?;
        let data = read_table_path(data)?;
        let catalog = Catalog::from_tables(&metadata, &data)?;
        Ok(Self::new(Arc::new(catalog), config))
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Lists the current view. Without an explicit sort the configured default sort
    /// column is used, ascending; a default naming an unknown column is skipped with a
    /// warning.
    pub fn list(&self, state: &FilterState, sort: Option<&SortSpec>) -> Result<CmdResult> {
        let base = &self.config.doi_base_url;
        if sort.is_some() {
            return commands::list::run(&self.catalog, state, sort, base);
        }

        match self.config.default_sort.as_deref() {
            Some(column) if self.catalog.schema().contains(column) => {
                let fallback = SortSpec::ascending(column);
                commands::list::run(&self.catalog, state, Some(&fallback), base)
            }
            Some(column) => {
                let mut result = commands::list::run(&self.catalog, state, None, base)?;
                result.add_message(CmdMessage::warning(format!(
                    "Ignoring default sort on unknown column: {}",
                    column
                )));
                Ok(result)
            }
            None => commands::list::run(&self.catalog, state, None, base),
        }
    }

    pub fn show(&self, id: usize, query: Option<&str>) -> Result<CmdResult> {
        commands::show::run(&self.catalog, id, query, &self.config.doi_base_url)
    }

    pub fn facets(&self, column: &str, state: &FilterState) -> Result<CmdResult> {
        commands::facets::run(&self.catalog, column, state)
    }

    pub fn schema(&self) -> Result<CmdResult> {
        commands::schema::run(&self.catalog)
    }

    /// Config does not need a loaded catalog.
    pub fn configure(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(config_dir, action)
    }
}

pub use crate::commands::{config::ConfigAction, CmdMessage, CmdResult, MessageLevel};
