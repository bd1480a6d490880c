//! `SeriesToRows` layout: one row per matched column.

use crate::display::display_name;
use crate::infer::guess_type;
use crate::matcher::Matcher;
use crate::reducer::ReducerRegistry;
use alloc::vec::Vec;
use tally_core::{Column, FieldType, Frame, Result, Value};

/// Name of the column holding the source column names.
pub const FIELD_COLUMN_NAME: &str = "Field";

/// Builds one name/value table per input frame.
pub(super) fn reduce_series_to_rows(
    frames: &[Frame],
    matcher: &Matcher,
    reducers: &ReducerRegistry,
    reducer_ids: &[&str],
) -> Result<Vec<Frame>> {
    let mut output = Vec::with_capacity(frames.len());

    for frame in frames {
        let mut names = Column::new(FIELD_COLUMN_NAME, FieldType::String);
        let mut calcs: Vec<Column> = reducer_ids
            .iter()
            .map(|&id| Column::new(id, FieldType::Other))
            .collect();

        for column in frame.columns() {
            if !matcher(column, frame, frames) {
                continue;
            }
            let results = reducers.reduce_column(column, reducer_ids)?;
            names.push(Value::String(display_name(column, frame, frames)));
            for (target, &id) in calcs.iter_mut().zip(reducer_ids) {
                target.push(results.get(id).cloned().unwrap_or(Value::Null));
            }
        }

        let length = names.len();
        let mut columns = Vec::with_capacity(calcs.len() + 1);
        columns.push(names);
        columns.extend(calcs);
        for column in &mut columns {
            if let Some(field_type) = guess_type(column) {
                column.set_field_type(field_type);
            }
        }

        output.push(frame.with_same_attributes(columns, length));
    }

    Ok(output)
}
