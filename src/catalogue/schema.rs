//! # Schema Compilation
//!
//! Turns the metadata table into a [`Schema`]. Each metadata record describes one data
//! column:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `Column Name` | Name of the data column |
//! | `Filter Label` | Label shown next to the filter control |
//! | `Explanation` | Longer description |
//! | `Role` | `TITLE`, `DOI` or anything else |
//! | `Type` | `TEXT`, `NUMBER`, `LIST` or `BOOLEAN` |
//! | `UI Control` | `NONE`, `SLIDER`, `OPTION`, `MULTIOPTION` or `CHECKBOX` |
//! | `Searchable` / `Display in Table` / `Display in Popup` | only the literal `YES` enables |
//!
//! The control decides the effective type:
//!
//! - `SLIDER` requires `NUMBER`, `MULTIOPTION` requires `LIST`, `CHECKBOX` requires
//!   `BOOLEAN`. Anything else fails the whole compilation.
//! - `OPTION` columns are categorical text whatever their declared type.
//! - Columns without a filter control (or with an unrecognised one) are free text.
//!
//! A DOI column is never displayed in the table (it becomes a link instead), but it may
//! still appear in the record detail.

use crate::error::SchemaError;
use crate::model::{ColumnKind, ColumnSchema, Control, Role, ValueType};
use crate::table::{RawRecord, RawTable};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;

pub const COLUMN_NAME: &str = "Column Name";
pub const FILTER_LABEL: &str = "Filter Label";
pub const EXPLANATION: &str = "Explanation";
pub const ROLE: &str = "Role";
pub const TYPE: &str = "Type";
pub const UI_CONTROL: &str = "UI Control";
pub const SEARCHABLE: &str = "Searchable";
pub const DISPLAY_IN_TABLE: &str = "Display in Table";
pub const DISPLAY_IN_POPUP: &str = "Display in Popup";

/// Every field a metadata table must carry, in canonical order.
pub const METADATA_FIELDS: [&str; 9] = [
    COLUMN_NAME,
    FILTER_LABEL,
    EXPLANATION,
    ROLE,
    TYPE,
    UI_CONTROL,
    SEARCHABLE,
    DISPLAY_IN_TABLE,
    DISPLAY_IN_POPUP,
];

const FLAG_ON: &str = "YES";

/// One metadata record, parsed but not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    pub column_name: String,
    pub filter_label: String,
    pub explanation: String,
    pub role: Role,
    /// `None` when the `Type` cell is not a known type.
    pub declared_type: Option<ValueType>,
    /// `None` when the `UI Control` cell is not a known control.
    pub control: Option<Control>,
    pub searchable: bool,
    pub display_in_table: bool,
    pub display_in_popup: bool,
}

impl MetadataRecord {
    pub fn from_raw(record: &RawRecord) -> Self {
        let field = |name: &str| record.get(name).unwrap_or_default().to_string();
        let flag = |name: &str| record.get(name) == Some(FLAG_ON);

        let column_name = field(COLUMN_NAME);
        let raw_type = record.get(TYPE).unwrap_or_default();
        let raw_control = record.get(UI_CONTROL).unwrap_or_default();

        let declared_type = raw_type.parse::<ValueType>().ok();
        if declared_type.is_none() && !raw_type.is_empty() {
            warn!("{}: unrecognised type '{}'", column_name, raw_type);
        }
        let control = raw_control.parse::<Control>().ok();
        if control.is_none() && !raw_control.is_empty() {
            warn!(
                "{}: unrecognised UI control '{}', treating as free text",
                column_name, raw_control
            );
        }

        Self {
            filter_label: field(FILTER_LABEL),
            explanation: field(EXPLANATION),
            role: Role::parse(record.get(ROLE).unwrap_or_default()),
            declared_type,
            control,
            searchable: flag(SEARCHABLE),
            display_in_table: flag(DISPLAY_IN_TABLE),
            display_in_popup: flag(DISPLAY_IN_POPUP),
            column_name,
        }
    }

    /// Resolves the legal column kind for this record's control and declared type.
    pub fn kind(&self) -> Result<ColumnKind, SchemaError> {
        let require = |control: Control, required: ValueType, kind: ColumnKind| {
            if self.declared_type == Some(required) {
                Ok(kind)
            } else {
                Err(SchemaError::ControlMismatch {
                    column: self.column_name.clone(),
                    control,
                    required,
                })
            }
        };

        match self.control {
            Some(Control::Slider) => require(Control::Slider, ValueType::Number, ColumnKind::Slider),
            Some(Control::MultiOption) => require(
                Control::MultiOption,
                ValueType::List,
                ColumnKind::MultiOption,
            ),
            Some(Control::Checkbox) => {
                require(Control::Checkbox, ValueType::Boolean, ColumnKind::Checkbox)
            }
            Some(Control::Option) => Ok(ColumnKind::Option),
            Some(Control::None) | None => Ok(ColumnKind::FreeText),
        }
    }
}

/// The compiled, whole-dataset schema.
///
/// Built once by [`compile_schema`] and read-only afterwards. Every name in a role or a
/// derived list is a key of the column mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    order: Vec<String>,
    columns: HashMap<String, ColumnSchema>,
    title_column: Option<String>,
    doi_column: Option<String>,
    sliders: Vec<String>,
    options: Vec<String>,
    multioptions: Vec<String>,
    checkboxes: Vec<String>,
    searchable_columns: Vec<String>,
    table_columns: Vec<String>,
    popup_columns: Vec<String>,
}

impl Schema {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in metadata order.
    pub fn column_names(&self) -> &[String] {
        &self.order
    }

    /// `(name, schema)` pairs in metadata order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnSchema)> {
        self.order
            .iter()
            .filter_map(|name| self.columns.get(name).map(|col| (name.as_str(), col)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn title_column(&self) -> Option<&str> {
        self.title_column.as_deref()
    }

    pub fn doi_column(&self) -> Option<&str> {
        self.doi_column.as_deref()
    }

    pub fn sliders(&self) -> &[String] {
        &self.sliders
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn multioptions(&self) -> &[String] {
        &self.multioptions
    }

    pub fn checkboxes(&self) -> &[String] {
        &self.checkboxes
    }

    pub fn searchable_columns(&self) -> &[String] {
        &self.searchable_columns
    }

    pub fn table_columns(&self) -> &[String] {
        &self.table_columns
    }

    pub fn popup_columns(&self) -> &[String] {
        &self.popup_columns
    }

    fn lists_mut(&mut self) -> [&mut Vec<String>; 7] {
        [
            &mut self.sliders,
            &mut self.options,
            &mut self.multioptions,
            &mut self.checkboxes,
            &mut self.searchable_columns,
            &mut self.table_columns,
            &mut self.popup_columns,
        ]
    }

    fn insert(&mut self, name: String, column: ColumnSchema, role: Role) {
        if self.columns.contains_key(&name) {
            warn!("{}: column described twice, the later record wins", name);
            for list in self.lists_mut() {
                list.retain(|n| n != &name);
            }
            self.order.retain(|n| n != &name);
            if self.title_column.as_deref() == Some(name.as_str()) {
                self.title_column = None;
            }
            if self.doi_column.as_deref() == Some(name.as_str()) {
                self.doi_column = None;
            }
        }

        match column.kind {
            ColumnKind::Slider => self.sliders.push(name.clone()),
            ColumnKind::Option => self.options.push(name.clone()),
            ColumnKind::MultiOption => self.multioptions.push(name.clone()),
            ColumnKind::Checkbox => self.checkboxes.push(name.clone()),
            ColumnKind::FreeText => {}
        }

        if column.searchable {
            self.searchable_columns.push(name.clone());
        }
        if column.display_in_table && role != Role::Doi {
            self.table_columns.push(name.clone());
        }
        if column.display_in_popup {
            self.popup_columns.push(name.clone());
        }

        match role {
            Role::Title => {
                if let Some(previous) = self.title_column.replace(name.clone()) {
                    warn!("TITLE role moved from {} to {}", previous, name);
                }
            }
            Role::Doi => {
                if let Some(previous) = self.doi_column.replace(name.clone()) {
                    warn!("DOI role moved from {} to {}", previous, name);
                }
            }
            Role::Other => {}
        }

        self.order.push(name.clone());
        self.columns.insert(name, column);
    }
}

/// Compiles a metadata table into a [`Schema`].
///
/// Fails without producing a partial schema when the table lacks any of the
/// [`METADATA_FIELDS`] or when a column's control does not fit its declared type.
pub fn compile_schema(metadata: &RawTable) -> Result<Schema, SchemaError> {
    let missing: Vec<String> = METADATA_FIELDS
        .iter()
        .filter(|field| !metadata.has_column(field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingFields(missing));
    }

    let mut schema = Schema::default();
    for raw in metadata.records() {
        let record = MetadataRecord::from_raw(raw);
        if record.column_name.is_empty() {
            warn!("Skipping metadata record without a column name");
            continue;
        }

        let kind = record.kind()?;
        let column = ColumnSchema {
            label: record.filter_label,
            explanation: record.explanation,
            kind,
            declared_type: record.declared_type,
            searchable: record.searchable,
            display_in_table: record.display_in_table,
            display_in_popup: record.display_in_popup,
        };
        schema.insert(record.column_name, column, record.role);
    }

    debug!(
        "Compiled schema: {} columns, {} searchable, {} shown in table",
        schema.len(),
        schema.searchable_columns.len(),
        schema.table_columns.len()
    );
    Ok(schema)
}
