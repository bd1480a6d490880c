//! Reducer registry.
//!
//! A reducer maps a column's values to one scalar. Reducer ids are opaque to
//! the transformer; the registry owns their meaning.

use crate::calcs;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tally_core::{Column, Error, Result, Value};

/// Reducer id → reduced scalar for one column.
pub type ReducerResult = HashMap<String, Value>;

/// Computes a single non-standard reducer.
pub type ReduceFn = fn(&Column) -> Value;

/// Ids of the built-in reducers.
pub mod ids {
    pub const LAST_NOT_NULL: &str = "lastNotNull";
    pub const LAST: &str = "last";
    pub const FIRST_NOT_NULL: &str = "firstNotNull";
    pub const FIRST: &str = "first";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const MEAN: &str = "mean";
    pub const SUM: &str = "sum";
    pub const COUNT: &str = "count";
    pub const RANGE: &str = "range";
    pub const DELTA: &str = "delta";
    pub const STEP: &str = "step";
    pub const DIFF: &str = "diff";
    pub const LOGMIN: &str = "logmin";
    pub const ALL_IS_ZERO: &str = "allIsZero";
    pub const ALL_IS_NULL: &str = "allIsNull";
    pub const CHANGE_COUNT: &str = "changeCount";
    pub const DISTINCT_COUNT: &str = "distinctCount";
    pub const STD_DEV: &str = "stdDev";
}

/// Describes one registered reducer.
#[derive(Clone, Debug)]
pub struct ReducerInfo {
    /// Stable id used in options.
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// How the value is computed.
    pub kind: ReducerKind,
}

/// How a reducer is computed.
#[derive(Clone, Copy)]
pub enum ReducerKind {
    /// Produced by the shared single-pass statistics.
    Standard,
    /// Produced by its own function.
    Custom(ReduceFn),
}

impl core::fmt::Debug for ReducerKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReducerKind::Standard => f.write_str("Standard"),
            ReducerKind::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl ReducerInfo {
    fn standard(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: String::from(id),
            name: String::from(name),
            description: String::from(description),
            kind: ReducerKind::Standard,
        }
    }

    /// Creates a reducer computed by `reduce`.
    pub fn custom(id: &str, name: &str, description: &str, reduce: ReduceFn) -> Self {
        Self {
            id: String::from(id),
            name: String::from(name),
            description: String::from(description),
            kind: ReducerKind::Custom(reduce),
        }
    }

    /// Returns whether this reducer comes from the shared statistics pass.
    #[inline]
    pub fn is_standard(&self) -> bool {
        matches!(self.kind, ReducerKind::Standard)
    }
}

/// Ordered collection of reducers, looked up by id.
#[derive(Clone, Debug, Default)]
pub struct ReducerRegistry {
    reducers: Vec<ReducerInfo>,
}

impl ReducerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in reducer.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for info in [
            ReducerInfo::standard(ids::LAST_NOT_NULL, "Last *", "Last non-null value"),
            ReducerInfo::standard(ids::LAST, "Last", "Last value"),
            ReducerInfo::standard(ids::FIRST_NOT_NULL, "First *", "First non-null value"),
            ReducerInfo::standard(ids::FIRST, "First", "First value"),
            ReducerInfo::standard(ids::MIN, "Min", "Minimum value"),
            ReducerInfo::standard(ids::MAX, "Max", "Maximum value"),
            ReducerInfo::standard(ids::MEAN, "Mean", "Average value"),
            ReducerInfo::standard(ids::SUM, "Total", "The sum of all values"),
            ReducerInfo::standard(ids::COUNT, "Count", "Number of values in response"),
            ReducerInfo::standard(ids::RANGE, "Range", "Difference between minimum and maximum values"),
            ReducerInfo::standard(ids::DELTA, "Delta", "Cumulative change in value, counter resets aware"),
            ReducerInfo::standard(ids::STEP, "Step", "Minimum interval between values"),
            ReducerInfo::standard(ids::DIFF, "Difference", "Difference between first and last values"),
            ReducerInfo::standard(ids::LOGMIN, "Min (above zero)", "Used for log min scale"),
            ReducerInfo::standard(ids::ALL_IS_ZERO, "All Zeros", "All values are zero"),
            ReducerInfo::standard(ids::ALL_IS_NULL, "All Nulls", "All values are null"),
            ReducerInfo::custom(
                ids::CHANGE_COUNT,
                "Change Count",
                "Number of times the value changes",
                calcs::change_count,
            ),
            ReducerInfo::custom(
                ids::DISTINCT_COUNT,
                "Distinct Count",
                "Number of distinct values",
                calcs::distinct_count,
            ),
            ReducerInfo::custom(
                ids::STD_DEV,
                "StdDev",
                "Standard deviation of all values",
                calcs::std_dev,
            ),
        ] {
            registry.register(info);
        }
        registry
    }

    /// Adds a reducer, replacing any reducer with the same id.
    pub fn register(&mut self, info: ReducerInfo) {
        match self.reducers.iter_mut().find(|r| r.id == info.id) {
            Some(existing) => *existing = info,
            None => self.reducers.push(info),
        }
    }

    /// Looks up a reducer by id.
    pub fn get(&self, id: &str) -> Option<&ReducerInfo> {
        self.reducers.iter().find(|r| r.id == id)
    }

    /// Returns every registered reducer in registration order.
    pub fn all(&self) -> &[ReducerInfo] {
        &self.reducers
    }

    /// Resolves `ids` in the given order, failing on the first unknown id.
    pub fn list<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<&ReducerInfo>> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.get(id).ok_or_else(|| Error::reducer_not_found(id))
            })
            .collect()
    }

    /// Reduces `column` with every reducer in `ids`.
    ///
    /// The result holds exactly the requested ids. Cached results in the
    /// column's state are reused when they cover the whole request.
    pub fn reduce_column<S: AsRef<str>>(&self, column: &Column, ids: &[S]) -> Result<ReducerResult> {
        let infos = self.list(ids)?;
        let mut result = ReducerResult::with_capacity(infos.len());
        if infos.is_empty() {
            return Ok(result);
        }

        if let Some(cached) = column.get_state().and_then(|s| s.calcs.as_ref()) {
            if infos.iter().all(|info| cached.contains_key(&info.id)) {
                for info in &infos {
                    result.insert(info.id.clone(), cached[&info.id].clone());
                }
                return Ok(result);
            }
        }

        let mut standard = if infos.iter().any(|info| info.is_standard()) {
            calcs::standard_calcs(column)
        } else {
            ReducerResult::new()
        };

        for info in infos {
            let value = match info.kind {
                ReducerKind::Standard => standard.remove(&info.id).unwrap_or(Value::Null),
                ReducerKind::Custom(reduce) => reduce(column),
            };
            result.insert(info.id.clone(), value);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec;
    use tally_core::{ColumnState, FieldType};

    fn column() -> Column {
        Column::with_values(
            "A",
            FieldType::Number,
            vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)],
        )
    }

    #[test]
    fn test_standard_registry_ids() {
        let registry = ReducerRegistry::standard();
        assert_eq!(registry.all().len(), 19);
        assert!(registry.get(ids::MAX).unwrap().is_standard());
        assert!(!registry.get(ids::STD_DEV).unwrap().is_standard());
        assert_eq!(registry.get(ids::SUM).unwrap().name, "Total");
    }

    #[test]
    fn test_list_preserves_order() {
        let registry = ReducerRegistry::standard();
        let infos = registry.list(&["min", "max", "mean"]).unwrap();
        let listed: Vec<&str> = infos.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(listed, vec!["min", "max", "mean"]);
    }

    #[test]
    fn test_list_unknown_reducer() {
        let registry = ReducerRegistry::standard();
        let err = registry.list(&["max", "p99"]).unwrap_err();
        assert_eq!(err, Error::reducer_not_found("p99"));
    }

    #[test]
    fn test_reduce_column_only_requested() {
        let registry = ReducerRegistry::standard();
        let result = registry
            .reduce_column(&column(), &["max", "min", "distinctCount"])
            .unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result["max"], Value::Int64(3));
        assert_eq!(result["min"], Value::Int64(1));
        assert_eq!(result["distinctCount"], Value::Int64(3));
    }

    #[test]
    fn test_reduce_column_empty_ids() {
        let registry = ReducerRegistry::standard();
        let ids: [&str; 0] = [];
        assert!(registry.reduce_column(&column(), &ids).unwrap().is_empty());
    }

    #[test]
    fn test_reduce_column_uses_cache() {
        let mut cached = BTreeMap::new();
        cached.insert(String::from("max"), Value::Int64(42));
        let col = column().state(ColumnState {
            display_name: None,
            calcs: Some(cached),
        });
        let registry = ReducerRegistry::standard();

        let result = registry.reduce_column(&col, &["max"]).unwrap();
        assert_eq!(result["max"], Value::Int64(42));

        // partially cached requests are recomputed
        let result = registry.reduce_column(&col, &["max", "min"]).unwrap();
        assert_eq!(result["max"], Value::Int64(3));
    }

    #[test]
    fn test_last_of_single_row_is_identity() {
        let registry = ReducerRegistry::standard();
        let col = Column::with_values("s", FieldType::String, vec![Value::from("only")]);
        let result = registry.reduce_column(&col, &["last"]).unwrap();
        assert_eq!(result["last"], Value::from("only"));
    }

    #[test]
    fn test_register_custom_reducer() {
        fn always_seven(_: &Column) -> Value {
            Value::Int64(7)
        }
        let mut registry = ReducerRegistry::new();
        registry.register(ReducerInfo::custom("seven", "Seven", "Always seven", always_seven));
        let result = registry.reduce_column(&column(), &["seven"]).unwrap();
        assert_eq!(result["seven"], Value::Int64(7));
        assert!(registry.get("max").is_none());
    }
}
