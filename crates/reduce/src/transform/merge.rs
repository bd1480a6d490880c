//! Concatenates same-schema frames into one.

use alloc::vec::Vec;
use tally_core::{Column, Frame};

/// Appends the rows of every later frame to the first frame.
///
/// Columns are paired by name and type; a base column takes the values of
/// every partner in a later frame, in column order. Columns of later frames
/// without a partner in the first frame are discarded. The result is unnamed and holds
/// as many rows as its first column.
pub fn merge_frames(frames: Vec<Frame>) -> Vec<Frame> {
    if frames.len() < 2 {
        return frames;
    }

    let mut iter = frames.into_iter();
    let Some(mut base) = iter.next() else {
        return Vec::new();
    };

    for (offset, frame) in iter.enumerate() {
        for target in base.columns_mut() {
            for source in frame.columns() {
                if same_column(source, target) {
                    target.extend_from(source);
                }
            }
        }
        for column in frame.columns() {
            if !base.columns().iter().any(|c| same_column(c, column)) {
                log::warn!(
                    "merge: dropping column {:?} ({}) of frame {}, no matching column in the first frame",
                    column.name(),
                    column.field_type().as_str(),
                    offset + 1
                );
            }
        }
    }

    base.clear_name();
    let length = base.columns().first().map_or(0, |c| c.len());
    base.set_len(length);
    alloc::vec![base]
}

fn same_column(a: &Column, b: &Column) -> bool {
    a.name() == b.name() && a.field_type() == b.field_type()
}
