//! Reducer math.
//!
//! The standard reducers share one pass over the column; the rest are
//! computed on their own.

use crate::reducer::{ids, ReducerResult};
use alloc::string::String;
use hashbrown::HashSet;
use libm::sqrt;
use tally_core::{Column, NullValueMode, Value};

fn null_mode(column: &Column) -> NullValueMode {
    column
        .get_config()
        .and_then(|c| c.null_value_mode)
        .unwrap_or_default()
}

/// Applies the column's null handling. `None` means the cell is skipped.
fn resolve_null(value: &Value, mode: NullValueMode) -> Option<Value> {
    match (value, mode) {
        (Value::Null, NullValueMode::AsZero) => Some(Value::Int64(0)),
        (Value::Null, NullValueMode::Ignore) => None,
        (v, _) => Some(v.clone()),
    }
}

fn is_zero(value: &Value) -> bool {
    value.as_f64() == Some(0.0)
}

/// Computes every standard reducer in a single pass.
///
/// `first` and `last` see raw cells, nulls included. Numeric statistics only
/// consider cells with a numeric view and stay `Null` when there are none.
pub(crate) fn standard_calcs(column: &Column) -> ReducerResult {
    let mode = null_mode(column);
    let values = column.values();

    let mut first = Value::Null;
    let mut last = Value::Null;
    let mut first_not_null = Value::Null;
    let mut last_not_null = Value::Null;
    let mut min: Option<Value> = None;
    let mut max: Option<Value> = None;
    let mut logmin: Option<f64> = None;
    let mut sum = 0.0f64;
    let mut int_sum = 0i128;
    let mut all_int = true;
    let mut numeric_count = 0usize;
    let mut all_is_null = true;
    let mut all_is_zero = true;
    let mut step: Option<f64> = None;
    let mut delta = 0.0f64;
    let mut previous_delta_up = true;
    let mut previous: Option<f64> = None;

    for (i, raw) in values.iter().enumerate() {
        if i == 0 {
            first = raw.clone();
        }
        last = raw.clone();

        let Some(value) = resolve_null(raw, mode) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        if first_not_null.is_null() {
            first_not_null = value.clone();
        }
        all_is_null = false;
        if !is_zero(&value) {
            all_is_zero = false;
        }

        if let Some(current) = value.as_f64() {
            sum += current;
            numeric_count += 1;
            match &value {
                Value::Int64(n) => int_sum += i128::from(*n),
                _ => all_int = false,
            }

            if let Some(prev) = previous {
                let diff = current - prev;
                if step.map_or(true, |s| diff < s) {
                    step = Some(diff);
                }
                if prev > current {
                    // counter reset
                    previous_delta_up = false;
                    if i == values.len() - 1 {
                        delta += current;
                    }
                } else {
                    if previous_delta_up {
                        delta += diff;
                    } else {
                        delta += current;
                    }
                    previous_delta_up = true;
                }
            }
            previous = Some(current);

            if max.as_ref().map_or(true, |m| value > *m) {
                max = Some(value.clone());
            }
            if min.as_ref().map_or(true, |m| value < *m) {
                min = Some(value.clone());
            }
            if current > 0.0 && logmin.map_or(true, |l| current < l) {
                logmin = Some(current);
            }
        }

        last_not_null = value;
    }

    let mut calcs = ReducerResult::new();
    let numeric = numeric_count > 0;

    let range = match (&min, &max) {
        (Some(lo), Some(hi)) => numeric_diff(hi, lo),
        _ => Value::Null,
    };
    let diff = if numeric {
        numeric_diff(&last_not_null, &first_not_null)
    } else {
        Value::Null
    };

    calcs.insert(String::from(ids::FIRST), first);
    calcs.insert(String::from(ids::LAST), last);
    calcs.insert(String::from(ids::FIRST_NOT_NULL), first_not_null);
    calcs.insert(String::from(ids::LAST_NOT_NULL), last_not_null);
    calcs.insert(String::from(ids::MIN), min.unwrap_or(Value::Null));
    calcs.insert(String::from(ids::MAX), max.unwrap_or(Value::Null));
    calcs.insert(String::from(ids::LOGMIN), Value::from(logmin));
    calcs.insert(
        String::from(ids::SUM),
        if !numeric {
            Value::Null
        } else if all_int {
            // exact while it fits, float beyond i64
            i64::try_from(int_sum).map_or(Value::Float64(int_sum as f64), Value::Int64)
        } else {
            Value::Float64(sum)
        },
    );
    calcs.insert(
        String::from(ids::MEAN),
        if numeric {
            Value::Float64(sum / numeric_count as f64)
        } else {
            Value::Null
        },
    );
    calcs.insert(String::from(ids::COUNT), Value::Int64(values.len() as i64));
    calcs.insert(String::from(ids::RANGE), range);
    calcs.insert(String::from(ids::DIFF), diff);
    calcs.insert(
        String::from(ids::DELTA),
        if numeric { Value::Float64(delta) } else { Value::Null },
    );
    calcs.insert(String::from(ids::STEP), Value::from(step));
    calcs.insert(String::from(ids::ALL_IS_NULL), Value::Boolean(all_is_null));
    calcs.insert(
        String::from(ids::ALL_IS_ZERO),
        Value::Boolean(!all_is_null && all_is_zero),
    );
    calcs
}

fn numeric_diff(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Int64(x), Value::Int64(y)) => Value::Int64(x.wrapping_sub(*y)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Value::Float64(x - y),
            _ => Value::Null,
        },
    }
}

/// Number of times consecutive cells differ.
pub(crate) fn change_count(column: &Column) -> Value {
    let mode = null_mode(column);
    let mut last: Option<Value> = None;
    let mut count = 0i64;
    for value in column.values().iter().filter_map(|v| resolve_null(v, mode)) {
        if last.as_ref().is_some_and(|l| *l != value) {
            count += 1;
        }
        last = Some(value);
    }
    Value::Int64(count)
}

/// Number of distinct cells. Null counts as a value unless ignored.
pub(crate) fn distinct_count(column: &Column) -> Value {
    let mode = null_mode(column);
    let distinct: HashSet<Value> = column
        .values()
        .iter()
        .filter_map(|v| resolve_null(v, mode))
        .collect();
    Value::Int64(distinct.len() as i64)
}

/// Population standard deviation of the numeric cells.
pub(crate) fn std_dev(column: &Column) -> Value {
    let mode = null_mode(column);
    let numbers: alloc::vec::Vec<f64> = column
        .values()
        .iter()
        .filter_map(|v| resolve_null(v, mode))
        .filter_map(|v| v.as_f64())
        .collect();

    if numbers.is_empty() {
        return Value::Null;
    }
    let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
    let variance = numbers.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / numbers.len() as f64;
    Value::Float64(sqrt(variance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use tally_core::{ColumnConfig, FieldType};

    fn ints(values: &[Option<i64>]) -> Column {
        Column::with_values(
            "v",
            FieldType::Number,
            values.iter().map(|&v| Value::from(v)).collect(),
        )
    }

    fn get<'a>(calcs: &'a ReducerResult, id: &str) -> &'a Value {
        calcs.get(id).unwrap()
    }

    #[test]
    fn test_basic_stats() {
        let calcs = standard_calcs(&ints(&[Some(1), Some(2), Some(3)]));
        assert_eq!(get(&calcs, ids::MAX), &Value::Int64(3));
        assert_eq!(get(&calcs, ids::MIN), &Value::Int64(1));
        assert_eq!(get(&calcs, ids::SUM), &Value::Int64(6));
        assert_eq!(get(&calcs, ids::MEAN), &Value::Float64(2.0));
        assert_eq!(get(&calcs, ids::COUNT), &Value::Int64(3));
        assert_eq!(get(&calcs, ids::RANGE), &Value::Int64(2));
        assert_eq!(get(&calcs, ids::DIFF), &Value::Int64(2));
        assert_eq!(get(&calcs, ids::STEP), &Value::Float64(1.0));
        assert_eq!(get(&calcs, ids::FIRST), &Value::Int64(1));
        assert_eq!(get(&calcs, ids::LAST), &Value::Int64(3));
    }

    #[test]
    fn test_nulls_seen_by_first_and_last() {
        let calcs = standard_calcs(&ints(&[None, Some(4), Some(2), None]));
        assert_eq!(get(&calcs, ids::FIRST), &Value::Null);
        assert_eq!(get(&calcs, ids::LAST), &Value::Null);
        assert_eq!(get(&calcs, ids::FIRST_NOT_NULL), &Value::Int64(4));
        assert_eq!(get(&calcs, ids::LAST_NOT_NULL), &Value::Int64(2));
        assert_eq!(get(&calcs, ids::MEAN), &Value::Float64(3.0));
        assert_eq!(get(&calcs, ids::COUNT), &Value::Int64(4));
    }

    #[test]
    fn test_null_as_zero() {
        let column = ints(&[Some(4), None]).config(ColumnConfig {
            null_value_mode: Some(NullValueMode::AsZero),
            ..ColumnConfig::default()
        });
        let calcs = standard_calcs(&column);
        assert_eq!(get(&calcs, ids::MIN), &Value::Int64(0));
        assert_eq!(get(&calcs, ids::MEAN), &Value::Float64(2.0));
        assert_eq!(get(&calcs, ids::LAST_NOT_NULL), &Value::Int64(0));
    }

    #[test]
    fn test_all_null_and_zero() {
        let calcs = standard_calcs(&ints(&[None, None]));
        assert_eq!(get(&calcs, ids::ALL_IS_NULL), &Value::Boolean(true));
        assert_eq!(get(&calcs, ids::ALL_IS_ZERO), &Value::Boolean(false));
        assert_eq!(get(&calcs, ids::MAX), &Value::Null);
        assert_eq!(get(&calcs, ids::SUM), &Value::Null);

        let calcs = standard_calcs(&ints(&[Some(0), None, Some(0)]));
        assert_eq!(get(&calcs, ids::ALL_IS_NULL), &Value::Boolean(false));
        assert_eq!(get(&calcs, ids::ALL_IS_ZERO), &Value::Boolean(true));
    }

    #[test]
    fn test_empty_column() {
        let calcs = standard_calcs(&ints(&[]));
        assert_eq!(get(&calcs, ids::COUNT), &Value::Int64(0));
        assert_eq!(get(&calcs, ids::LAST), &Value::Null);
        assert_eq!(get(&calcs, ids::MEAN), &Value::Null);
        assert_eq!(get(&calcs, ids::STEP), &Value::Null);
    }

    #[test]
    fn test_delta_handles_counter_reset() {
        // 1 -> 5 adds 4; after the reset the next reading counts from zero
        let calcs = standard_calcs(&ints(&[Some(1), Some(5), Some(2), Some(3)]));
        assert_eq!(get(&calcs, ids::DELTA), &Value::Float64(7.0));
        assert_eq!(get(&calcs, ids::STEP), &Value::Float64(-3.0));
    }

    #[test]
    fn test_logmin_skips_non_positive() {
        let calcs = standard_calcs(&ints(&[Some(-1), Some(0), Some(3), Some(2)]));
        assert_eq!(get(&calcs, ids::LOGMIN), &Value::Float64(2.0));
        assert_eq!(get(&calcs, ids::MIN), &Value::Int64(-1));
    }

    #[test]
    fn test_mixed_numbers_sum_float() {
        let column = Column::with_values(
            "v",
            FieldType::Number,
            vec![Value::Int64(1), Value::Float64(0.5)],
        );
        let calcs = standard_calcs(&column);
        assert_eq!(get(&calcs, ids::SUM), &Value::Float64(1.5));
        assert_eq!(get(&calcs, ids::MAX), &Value::Int64(1));
    }

    #[test]
    fn test_int_sum_is_exact() {
        let big = (1i64 << 53) + 1;
        let column = ints(&[Some(big), Some(1), Some(1)]);
        let calcs = standard_calcs(&column);
        assert_eq!(get(&calcs, ids::SUM), &Value::Int64(big + 2));

        let column = ints(&[Some(i64::MAX), Some(i64::MAX)]);
        let calcs = standard_calcs(&column);
        assert_eq!(get(&calcs, ids::SUM), &Value::Float64(2.0 * i64::MAX as f64));
    }

    #[test]
    fn test_strings_only_positional() {
        let column = Column::with_values(
            "host",
            FieldType::String,
            vec![Value::from("a"), Value::from("b")],
        );
        let calcs = standard_calcs(&column);
        assert_eq!(get(&calcs, ids::FIRST), &Value::from("a"));
        assert_eq!(get(&calcs, ids::LAST_NOT_NULL), &Value::from("b"));
        assert_eq!(get(&calcs, ids::MAX), &Value::Null);
        assert_eq!(get(&calcs, ids::MEAN), &Value::Null);
        assert_eq!(get(&calcs, ids::DIFF), &Value::Null);
        assert_eq!(get(&calcs, ids::ALL_IS_NULL), &Value::Boolean(false));
    }

    #[test]
    fn test_time_column_keeps_time_values() {
        let column = Column::with_values(
            "Time",
            FieldType::Time,
            vec![Value::Time(1000), Value::Time(3000)],
        );
        let calcs = standard_calcs(&column);
        assert_eq!(get(&calcs, ids::MAX), &Value::Time(3000));
        assert_eq!(get(&calcs, ids::RANGE), &Value::Float64(2000.0));
    }

    #[test]
    fn test_change_count() {
        assert_eq!(
            change_count(&ints(&[Some(1), Some(1), Some(2), Some(1)])),
            Value::Int64(2)
        );
        // a null between equal values is a change in both directions
        assert_eq!(change_count(&ints(&[Some(1), None, Some(1)])), Value::Int64(2));
        assert_eq!(change_count(&ints(&[])), Value::Int64(0));
    }

    #[test]
    fn test_distinct_count() {
        assert_eq!(
            distinct_count(&ints(&[Some(1), Some(2), Some(1), None, None])),
            Value::Int64(3)
        );
        let ignored = ints(&[Some(1), None]).config(ColumnConfig {
            null_value_mode: Some(NullValueMode::Ignore),
            ..ColumnConfig::default()
        });
        assert_eq!(distinct_count(&ignored), Value::Int64(1));
    }

    #[test]
    fn test_std_dev() {
        let values: Vec<Option<i64>> = [2, 4, 4, 4, 5, 5, 7, 9].iter().map(|&v| Some(v)).collect();
        match std_dev(&ints(&values)) {
            Value::Float64(sd) => assert!((sd - 2.0).abs() < 0.001),
            other => panic!("Expected Float64 value, got {:?}", other),
        }
        assert_eq!(std_dev(&ints(&[None])), Value::Null);
    }
}
