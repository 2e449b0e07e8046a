use crate::config::CatalogConfig;
use crate::facets::Facets;
use crate::format::{RecordDetail, TableView};
use crate::model::Row;
use serde::Serialize;

pub mod config;
pub mod facets;
pub mod list;
pub mod schema;
pub mod show;

pub use schema::ColumnSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A facet listing for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFacets {
    pub column: String,
    pub facets: Facets,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Rows of the current view, in display order.
    pub listed_rows: Vec<Row>,
    /// Number of rows in the whole catalog.
    pub total: usize,
    pub table: Option<TableView>,
    pub detail: Option<RecordDetail>,
    pub facets: Option<ColumnFacets>,
    pub columns: Vec<ColumnSummary>,
    pub config: Option<CatalogConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_rows(mut self, rows: Vec<Row>, total: usize) -> Self {
        self.listed_rows = rows;
        self.total = total;
        self
    }

    pub fn with_table(mut self, table: TableView) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_detail(mut self, detail: RecordDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_facets(mut self, column: impl Into<String>, facets: Facets) -> Self {
        self.facets = Some(ColumnFacets {
            column: column.into(),
            facets,
        });
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnSummary>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = Some(config);
        self
    }
}
