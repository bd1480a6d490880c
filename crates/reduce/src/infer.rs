//! Field type inference for synthesized columns.

use tally_core::{Column, FieldType, Value};

/// Guesses a column's type from its name, then from its first non-null value.
///
/// Returns None when every value is null.
pub fn guess_type(column: &Column) -> Option<FieldType> {
    let name = column.name();
    if name.eq_ignore_ascii_case("time") || name.eq_ignore_ascii_case("date") {
        return Some(FieldType::Time);
    }

    column
        .values()
        .iter()
        .find(|v| !v.is_null())
        .map(guess_type_from_value)
}

/// Guesses a type for a single value.
pub fn guess_type_from_value(value: &Value) -> FieldType {
    match value {
        Value::Int64(_) | Value::Float64(_) => FieldType::Number,
        Value::Time(_) => FieldType::Time,
        Value::Boolean(_) => FieldType::Boolean,
        Value::String(s) => guess_type_from_str(s),
        Value::Null => FieldType::Other,
    }
}

fn guess_type_from_str(s: &str) -> FieldType {
    let trimmed = s.trim();
    if is_decimal(trimmed) {
        return FieldType::Number;
    }
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return FieldType::Boolean;
    }
    FieldType::String
}

/// Plain decimal text: `-?digits(.digits)?([eE][+-]?digits)?`, with at least
/// one mantissa digit. Rejects `nan`, `inf` and a leading `+`.
fn is_decimal(s: &str) -> bool {
    fn digits(bytes: &[u8], mut i: usize) -> usize {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    }

    let bytes = s.as_bytes();
    let mut i = usize::from(bytes.first() == Some(&b'-'));

    let int_end = digits(bytes, i);
    let mut mantissa_digits = int_end - i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits(bytes, i + 1);
        if frac_end == i + 1 {
            return false;
        }
        mantissa_digits += frac_end - i - 1;
        i = frac_end;
    }
    if mantissa_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_end = digits(bytes, i);
        if exp_end == i {
            return false;
        }
        i = exp_end;
    }

    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_guess_by_name() {
        let col = Column::with_values("Time", FieldType::Other, vec![Value::Int64(1)]);
        assert_eq!(guess_type(&col), Some(FieldType::Time));
        let col = Column::new("DATE", FieldType::Other);
        assert_eq!(guess_type(&col), Some(FieldType::Time));
    }

    #[test]
    fn test_guess_first_non_null() {
        let col = Column::with_values(
            "max",
            FieldType::Other,
            vec![Value::Null, Value::Float64(1.5), Value::from("x")],
        );
        assert_eq!(guess_type(&col), Some(FieldType::Number));
    }

    #[test]
    fn test_all_null_is_unknown() {
        let col = Column::with_values("max", FieldType::Other, vec![Value::Null, Value::Null]);
        assert_eq!(guess_type(&col), None);
        assert_eq!(guess_type(&Column::new("max", FieldType::Other)), None);
    }

    #[test]
    fn test_guess_strings() {
        assert_eq!(guess_type_from_value(&Value::from("cpu")), FieldType::String);
        assert_eq!(guess_type_from_value(&Value::from(" 12.5 ")), FieldType::Number);
        assert_eq!(guess_type_from_value(&Value::from("-3e2")), FieldType::Number);
        assert_eq!(guess_type_from_value(&Value::from("TRUE")), FieldType::Boolean);
        assert_eq!(guess_type_from_value(&Value::from("")), FieldType::String);
    }

    #[test]
    fn test_non_decimal_words_stay_strings() {
        for word in ["nan", "NaN", "inf", "-inf", "Infinity", "+5", "1.", ".", "-", "1e", "1e+", "0x10"] {
            assert_eq!(guess_type_from_value(&Value::from(word)), FieldType::String, "{}", word);
        }
        for number in ["0", "-7", ".5", "3.25", "1e9", "2.5E-3", "-0.0e+1"] {
            assert_eq!(guess_type_from_value(&Value::from(number)), FieldType::Number, "{}", number);
        }
    }

    #[test]
    fn test_guess_other_values() {
        assert_eq!(guess_type_from_value(&Value::Time(5)), FieldType::Time);
        assert_eq!(guess_type_from_value(&Value::Boolean(false)), FieldType::Boolean);
    }
}
