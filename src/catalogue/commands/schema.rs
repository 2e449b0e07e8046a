use crate::api::Catalog;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::ColumnSchema;
use serde::Serialize;

/// One compiled column as shown by the `schema` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub role: Option<&'static str>,
    #[serde(flatten)]
    pub column: ColumnSchema,
}

pub fn run(catalog: &Catalog) -> Result<CmdResult> {
    let schema = catalog.schema();
    let columns = schema
        .columns()
        .map(|(name, column)| {
            let role = if schema.title_column() == Some(name) {
                Some("TITLE")
            } else if schema.doi_column() == Some(name) {
                Some("DOI")
            } else {
                None
            };
            ColumnSummary {
                name: name.to_string(),
                role,
                column: column.clone(),
            }
        })
        .collect();
    Ok(CmdResult::default().with_columns(columns))
}
