use crate::model::{Control, ValueType};
use thiserror::Error;

/// Failures while compiling the metadata table into a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Missing metadata fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{column}: {control} control only works with {required} type")]
    ControlMismatch {
        column: String,
        control: Control,
        required: ValueType,
    },
}

/// Failures while coercing the data table against a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("Columns missing metadata: {}", .0.join(", "))]
    UnmappedColumns(Vec<String>),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Coercion error: {0}")]
    Coercion(#[from] CoercionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
