//! Column kinds, coerced values and rows.
//!
//! The metadata table declares a `Type` and a `UI Control` per column, but only a handful
//! of pairs are meaningful. [`ColumnKind`] is the set of legal pairs; once a schema has
//! been compiled every column carries exactly one kind and the effective [`ValueType`]
//! and [`Control`] are derived from it.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The semantic type of a column's coerced values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Text,
    Number,
    List,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "TEXT",
            ValueType::Number => "NUMBER",
            ValueType::List => "LIST",
            ValueType::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(ValueType::Text),
            "NUMBER" => Ok(ValueType::Number),
            "LIST" => Ok(ValueType::List),
            "BOOLEAN" => Ok(ValueType::Boolean),
            other => Err(format!("Unknown type: {}", other)),
        }
    }
}

/// The filter interaction attached to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Control {
    None,
    Slider,
    Option,
    MultiOption,
    Checkbox,
}

impl Control {
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::None => "NONE",
            Control::Slider => "SLIDER",
            Control::Option => "OPTION",
            Control::MultiOption => "MULTIOPTION",
            Control::Checkbox => "CHECKBOX",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Control {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Control::None),
            "SLIDER" => Ok(Control::Slider),
            "OPTION" => Ok(Control::Option),
            "MULTIOPTION" => Ok(Control::MultiOption),
            "CHECKBOX" => Ok(Control::Checkbox),
            other => Err(format!("Unknown UI control: {}", other)),
        }
    }
}

/// Special designation of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Doi,
    Other,
}

impl Role {
    /// Anything other than the two known roles is an ordinary column.
    pub fn parse(s: &str) -> Self {
        match s {
            "TITLE" => Role::Title,
            "DOI" => Role::Doi,
            _ => Role::Other,
        }
    }
}

/// A legal (type, control) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free text, shown and searched but never filtered.
    FreeText,
    /// NUMBER values filtered by an inclusive range.
    Slider,
    /// Categorical TEXT filtered by a single choice.
    Option,
    /// LIST values filtered by any-of.
    MultiOption,
    /// BOOLEAN values filtered by "must be true".
    Checkbox,
}

impl ColumnKind {
    pub fn value_type(&self) -> ValueType {
        match self {
            ColumnKind::FreeText | ColumnKind::Option => ValueType::Text,
            ColumnKind::Slider => ValueType::Number,
            ColumnKind::MultiOption => ValueType::List,
            ColumnKind::Checkbox => ValueType::Boolean,
        }
    }

    pub fn control(&self) -> Control {
        match self {
            ColumnKind::FreeText => Control::None,
            ColumnKind::Slider => Control::Slider,
            ColumnKind::Option => Control::Option,
            ColumnKind::MultiOption => Control::MultiOption,
            ColumnKind::Checkbox => Control::Checkbox,
        }
    }

    /// Human readable name used by the `schema` command.
    pub fn describe(&self) -> &'static str {
        match self {
            ColumnKind::FreeText => "free text",
            ColumnKind::Slider => "number range",
            ColumnKind::Option => "single option",
            ColumnKind::MultiOption => "multiple options",
            ColumnKind::Checkbox => "checkbox",
        }
    }
}

/// Compiled description of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSchema {
    pub label: String,
    pub explanation: String,
    pub kind: ColumnKind,
    /// The type as written in the metadata, `None` when it was not recognised.
    pub declared_type: Option<ValueType>,
    pub searchable: bool,
    pub display_in_table: bool,
    pub display_in_popup: bool,
}

impl ColumnSchema {
    pub fn value_type(&self) -> ValueType {
        self.kind.value_type()
    }

    pub fn control(&self) -> Control {
        self.kind.control()
    }
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(Option<String>),
    Number(Option<f64>),
    List(Vec<String>),
    Boolean(bool),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Text(_) => ValueType::Text,
            Value::Number(_) => ValueType::Number,
            Value::List(_) => ValueType::List,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }

    /// Null text or number, or an empty list. Booleans always hold a value.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(v) => v.is_none(),
            Value::Number(v) => v.is_none(),
            Value::List(v) => v.is_empty(),
            Value::Boolean(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => *v,
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Raw string form that coerces back to this same value.
    ///
    /// Null values have no raw form (they are written as absent fields).
    pub fn to_raw(&self) -> Option<String> {
        match self {
            Value::Text(v) => v.clone(),
            Value::Number(v) => v.map(format_number),
            Value::List(v) if v.is_empty() => None,
            Value::List(v) => Some(v.join(", ")),
            Value::Boolean(v) => Some(v.to_string()),
        }
    }
}

/// Formats integral numbers without a fractional part ("2010", not "2010.0").
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A coerced record. `id` is the record's position in the source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub id: usize,
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// The row as raw `column -> string` pairs, omitting null fields.
    pub fn to_raw_record(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .filter_map(|(column, value)| value.to_raw().map(|raw| (column.clone(), raw)))
            .collect()
    }
}
