//! Column definition for Tally frames.

use crate::types::FieldType;
use crate::value::Value;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Key/value labels attached to a frame or column.
pub type Labels = BTreeMap<String, String>;

/// Renders labels as `{a="1", b="2"}`, or an empty string for no labels.
pub fn format_labels(labels: &Labels) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = labels
        .iter()
        .map(|(k, v)| alloc::format!("{}=\"{}\"", k, v))
        .collect();
    alloc::format!("{{{}}}", parts.join(", "))
}

/// How reducers treat null cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NullValueMode {
    /// Nulls are skipped by statistics but still seen by `first`/`last`.
    #[default]
    Null,
    /// Nulls are skipped everywhere they can be.
    Ignore,
    /// Nulls count as zero.
    AsZero,
}

/// Display and formatting metadata.
///
/// Tally only reads `display_name` and `null_value_mode`; the rest travels with
/// the column so downstream consumers keep their formatting.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ColumnConfig {
    /// Overrides the generated display name.
    pub display_name: Option<String>,
    /// Unit identifier, e.g. `"bytes"`.
    pub unit: Option<String>,
    /// Number of decimals to render.
    pub decimals: Option<u32>,
    /// Lower bound hint.
    pub min: Option<f64>,
    /// Upper bound hint.
    pub max: Option<f64>,
    /// Null handling for reducers.
    pub null_value_mode: Option<NullValueMode>,
}

/// Derived per-column cache.
///
/// Never durable: every copy of a column starts without it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnState {
    /// Previously resolved display name.
    pub display_name: Option<String>,
    /// Previously computed reducer results, keyed by reducer id.
    pub calcs: Option<BTreeMap<String, Value>>,
}

/// A named, typed sequence of values inside a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    field_type: FieldType,
    values: Vec<Value>,
    config: Option<ColumnConfig>,
    labels: Option<Labels>,
    state: Option<ColumnState>,
}

impl Column {
    /// Creates an empty column.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            values: Vec::new(),
            config: None,
            labels: None,
            state: None,
        }
    }

    /// Creates a column holding `values`.
    pub fn with_values(name: impl Into<String>, field_type: FieldType, values: Vec<Value>) -> Self {
        Self {
            values,
            ..Self::new(name, field_type)
        }
    }

    /// Sets the display config.
    pub fn config(mut self, config: ColumnConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the labels.
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Adds a single label, creating the label map if needed.
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_label(key, value);
        self
    }

    /// Sets the transient state.
    pub fn state(mut self, state: ColumnState) -> Self {
        self.state = Some(state);
        self
    }

    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field type.
    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Replaces the field type.
    pub fn set_field_type(&mut self, field_type: FieldType) {
        self.field_type = field_type;
    }

    /// Returns the values.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the column holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the value at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Appends a value.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Appends every value of `other`, preserving order.
    pub fn extend_from(&mut self, other: &Column) {
        self.values.extend_from_slice(&other.values);
    }

    /// Returns the display config, if any.
    #[inline]
    pub fn get_config(&self) -> Option<&ColumnConfig> {
        self.config.as_ref()
    }

    /// Returns the labels, if any.
    #[inline]
    pub fn get_labels(&self) -> Option<&Labels> {
        self.labels.as_ref()
    }

    /// Returns a single label value.
    pub fn get_label(&self, key: &str) -> Option<&str> {
        self.labels.as_ref()?.get(key).map(String::as_str)
    }

    /// Sets a label, creating the label map if needed.
    pub fn set_label(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels
            .get_or_insert_with(Labels::new)
            .insert(key.into(), value.into());
    }

    /// Returns the transient state, if any.
    #[inline]
    pub fn get_state(&self) -> Option<&ColumnState> {
        self.state.as_ref()
    }

    /// Copies name, type, config and labels; drops values and state.
    pub fn structural_copy(&self) -> Self {
        self.copy_with_values(Vec::new())
    }

    /// Copies name, type, config and labels with `values` replacing the original
    /// values. State is never carried over.
    pub fn copy_with_values(&self, values: Vec<Value>) -> Self {
        Self {
            name: self.name.clone(),
            field_type: self.field_type,
            values,
            config: self.config.clone(),
            labels: self.labels.clone(),
            state: None,
        }
    }
}
