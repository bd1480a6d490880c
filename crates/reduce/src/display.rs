//! Human readable column names.

use alloc::string::String;
use alloc::vec::Vec;
use tally_core::{format_labels, Column, FieldType, Frame};

/// Name used for value columns that carry no useful name of their own.
pub const VALUE_FIELD_NAME: &str = "Value";

/// Name used for unnamed time columns.
pub const TIME_FIELD_NAME: &str = "Time";

/// Resolves the name a column is shown under.
///
/// `column` should be borrowed from `frame`; duplicate names inside one frame
/// are told apart by position.
pub fn display_name(column: &Column, frame: &Frame, all_frames: &[Frame]) -> String {
    if let Some(name) = column.get_config().and_then(|c| c.display_name.as_ref()) {
        return name.clone();
    }
    if let Some(name) = column.get_state().and_then(|s| s.display_name.as_ref()) {
        return name.clone();
    }
    calculate_display_name(column, frame, all_frames)
}

fn calculate_display_name(column: &Column, frame: &Frame, all_frames: &[Frame]) -> String {
    let name = column.name();

    if column.field_type() == FieldType::Time && column.get_labels().is_none() {
        return if name.is_empty() {
            String::from(TIME_FIELD_NAME)
        } else {
            String::from(name)
        };
    }

    let frame_names_differ = all_frames
        .windows(2)
        .any(|pair| pair[0].get_name() != pair[1].get_name());

    let mut parts: Vec<String> = Vec::new();
    let mut frame_name_added = false;
    let mut labels_added = false;

    if frame_names_differ {
        if let Some(frame_name) = frame.get_name() {
            parts.push(String::from(frame_name));
            frame_name_added = true;
        }
    }

    if !name.is_empty() && name != VALUE_FIELD_NAME {
        parts.push(String::from(name));
    }

    if let Some(labels) = column.get_labels() {
        let single = if all_frames.is_empty() {
            single_label_name(core::slice::from_ref(frame))
        } else {
            single_label_name(all_frames)
        };
        match single {
            Some(key) => {
                if let Some(value) = labels.get(&key) {
                    parts.push(value.clone());
                    labels_added = true;
                }
            }
            None => {
                let formatted = format_labels(labels);
                if !formatted.is_empty() {
                    parts.push(formatted);
                    labels_added = true;
                }
            }
        }
    }

    if !frame_name_added && !labels_added && name == VALUE_FIELD_NAME {
        if let Some(frame_name) = frame.get_name().filter(|n| !n.is_empty()) {
            parts.push(String::from(frame_name));
        }
    }

    let display = if !parts.is_empty() {
        parts.join(" ")
    } else if !name.is_empty() {
        String::from(name)
    } else {
        String::from(VALUE_FIELD_NAME)
    };

    if display == name {
        unique_name(column, frame)
    } else {
        display
    }
}

/// The one label key shared by every labelled column, if there is exactly one.
fn single_label_name(frames: &[Frame]) -> Option<String> {
    let mut single: Option<&String> = None;
    for labels in frames
        .iter()
        .flat_map(|f| f.columns())
        .filter_map(Column::get_labels)
    {
        for key in labels.keys() {
            match single {
                None => single = Some(key),
                Some(existing) if existing != key => return None,
                Some(_) => {}
            }
        }
    }
    single.cloned()
}

/// Appends a counter when other columns in `frame` share this column's name.
fn unique_name(column: &Column, frame: &Frame) -> String {
    let mut dupes = 0usize;
    let mut found_self = false;
    for other in frame.columns() {
        if core::ptr::eq(column, other) {
            found_self = true;
            if dupes > 0 {
                dupes += 1;
                break;
            }
        } else if other.name() == column.name() {
            dupes += 1;
            if found_self {
                break;
            }
        }
    }
    if dupes > 0 {
        alloc::format!("{} {}", column.name(), dupes)
    } else {
        String::from(column.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tally_core::{ColumnConfig, ColumnState, Value};

    fn num(name: &str) -> Column {
        Column::with_values(name, FieldType::Number, vec![Value::Int64(1)])
    }

    fn only(frame: &Frame) -> String {
        display_name(&frame.columns()[0], frame, core::slice::from_ref(frame))
    }

    #[test]
    fn test_plain_name() {
        let frame = Frame::with_columns(vec![num("A")]);
        assert_eq!(only(&frame), "A");
    }

    #[test]
    fn test_config_and_state_win() {
        let frame = Frame::with_columns(vec![num("A").config(ColumnConfig {
            display_name: Some("Alpha".into()),
            ..ColumnConfig::default()
        })]);
        assert_eq!(only(&frame), "Alpha");

        let frame = Frame::with_columns(vec![num("A").state(ColumnState {
            display_name: Some("cached".into()),
            calcs: None,
        })]);
        assert_eq!(only(&frame), "cached");
    }

    #[test]
    fn test_time_column() {
        let frame = Frame::with_columns(vec![Column::new("", FieldType::Time)]).name("s");
        assert_eq!(only(&frame), "Time");
    }

    #[test]
    fn test_value_column_uses_frame_name() {
        let frame = Frame::with_columns(vec![num("Value")]).name("cpu");
        assert_eq!(only(&frame), "cpu");

        let frame = Frame::with_columns(vec![num("Value")]);
        assert_eq!(only(&frame), "Value");
    }

    #[test]
    fn test_frame_names_differ() {
        let frames = vec![
            Frame::with_columns(vec![num("A")]).name("s1"),
            Frame::with_columns(vec![num("A")]).name("s2"),
        ];
        assert_eq!(display_name(&frames[1].columns()[0], &frames[1], &frames), "s2 A");
    }

    #[test]
    fn test_single_label_value() {
        let frames = vec![
            Frame::with_columns(vec![num("Value").label("host", "a")]),
            Frame::with_columns(vec![num("Value").label("host", "b")]),
        ];
        assert_eq!(display_name(&frames[0].columns()[0], &frames[0], &frames), "a");
    }

    #[test]
    fn test_multiple_labels_formatted() {
        let frame = Frame::with_columns(vec![num("cpu").label("host", "a").label("dc", "eu")]);
        assert_eq!(only(&frame), "cpu {dc=\"eu\", host=\"a\"}");
    }

    #[test]
    fn test_duplicate_names_get_counters() {
        let frame = Frame::with_columns(vec![num("A"), num("A"), num("B")]);
        let frames = core::slice::from_ref(&frame);
        assert_eq!(display_name(&frame.columns()[0], &frame, frames), "A 1");
        assert_eq!(display_name(&frame.columns()[1], &frame, frames), "A 2");
        assert_eq!(display_name(&frame.columns()[2], &frame, frames), "B");
    }
}
