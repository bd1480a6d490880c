//! Reduce transformer options.

use crate::matcher::MatcherConfig;
use crate::reducer::ids;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Output layout of the reduce transformer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ReduceMode {
    /// One row per matched column, one column per reducer.
    #[default]
    SeriesToRows,
    /// One single-row column per matched column and reducer.
    ReduceField,
}

/// Configuration of one reduce run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ReduceOptions {
    /// Reducer ids, in output order.
    pub reducers: Vec<String>,
    /// Column selection. Defaults depend on the mode.
    pub fields: Option<MatcherConfig>,
    /// Output layout.
    pub mode: ReduceMode,
    /// Keeps time columns in `ReduceField` mode when `fields` is unset.
    pub include_time_field: bool,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            reducers: vec![String::from(ids::MAX)],
            fields: None,
            mode: ReduceMode::default(),
            include_time_field: false,
        }
    }
}

impl ReduceOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the reducer ids.
    pub fn with_reducers<I, S>(mut self, reducers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reducers = reducers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the column selection.
    pub fn with_fields(mut self, fields: MatcherConfig) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Sets the output layout.
    pub fn with_mode(mut self, mode: ReduceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether time columns are kept in `ReduceField` mode.
    pub fn include_time_field(mut self, include: bool) -> Self {
        self.include_time_field = include;
        self
    }

    /// Reducer ids with later duplicates removed.
    pub(crate) fn unique_reducers(&self) -> Vec<&str> {
        let mut unique: Vec<&str> = Vec::with_capacity(self.reducers.len());
        for id in &self.reducers {
            if !unique.contains(&id.as_str()) {
                unique.push(id.as_str());
            }
        }
        unique
    }
}

/// Static description of a transformer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformerInfo {
    /// Stable id.
    pub id: &'static str,
    /// Human readable name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}
