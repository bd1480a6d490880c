//! `ReduceField` layout: every reduced value becomes a single-row column.

use crate::matcher::Matcher;
use crate::reducer::ReducerRegistry;
use alloc::vec;
use alloc::vec::Vec;
use tally_core::{Frame, Result, Value};

/// Label carrying the reducer id when more than one reducer runs.
pub const REDUCER_LABEL: &str = "reducer";

/// Reduces each frame on its own. Frames left without columns are dropped.
pub(super) fn reduce_fields(
    frames: &[Frame],
    matcher: &Matcher,
    reducers: &ReducerRegistry,
    reducer_ids: &[&str],
) -> Result<Vec<Frame>> {
    let mut output = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        let mut columns = Vec::new();

        for column in frame.columns() {
            if !matcher(column, frame, frames) {
                continue;
            }
            let results = reducers.reduce_column(column, reducer_ids)?;
            for &id in reducer_ids {
                let value = results.get(id).cloned().unwrap_or(Value::Null);
                let mut reduced = column.copy_with_values(vec![value]);
                if reducer_ids.len() > 1 {
                    reduced.set_label(REDUCER_LABEL, id);
                }
                columns.push(reduced);
            }
        }

        if columns.is_empty() {
            log::debug!("reduce: frame {} has nothing to reduce, dropping it", index);
            continue;
        }
        output.push(frame.with_same_attributes(columns, 1));
    }

    Ok(output)
}
