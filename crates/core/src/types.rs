//! Field type definitions for Tally.
//!
//! This module defines the logical types a column can carry.

/// Logical type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldType {
    /// Numeric values (integers or floats)
    Number,
    /// UTF-8 strings
    String,
    /// Timestamps stored as Unix milliseconds
    Time,
    /// Boolean values
    Boolean,
    /// Anything else, including columns whose type is not known yet
    #[default]
    Other,
}

impl FieldType {
    /// Returns the lowercase name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Time => "time",
            FieldType::Boolean => "boolean",
            FieldType::Other => "other",
        }
    }

    /// Parses a configuration name back into a type.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "number" => Some(FieldType::Number),
            "string" => Some(FieldType::String),
            "time" => Some(FieldType::Time),
            "boolean" => Some(FieldType::Boolean),
            "other" => Some(FieldType::Other),
            _ => None,
        }
    }

    /// Returns whether reducers can compute numeric statistics for this type.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number)
    }
}
