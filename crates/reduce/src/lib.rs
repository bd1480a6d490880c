//! Tally Reduce - collapse frame columns to summary values.
//!
//! The reduce transformer selects columns with a [`Matcher`], reduces every
//! selected column with the configured reducers and emits the results in one
//! of two layouts:
//!
//! - [`ReduceMode::SeriesToRows`]: a `Field` column naming each source column
//!   plus one column per reducer. Per-frame tables are merged into one frame.
//! - [`ReduceMode::ReduceField`]: every frame keeps its identity; each selected
//!   column becomes one single-row column per reducer.
//!
//! # Example
//!
//! ```rust
//! use tally_core::{Column, FieldType, Frame, Value};
//! use tally_reduce::{reduce, ReduceOptions};
//!
//! let frame = Frame::with_columns(vec![
//!     Column::with_values("Time", FieldType::Time, vec![Value::Time(1), Value::Time(2)]),
//!     Column::with_values("cpu", FieldType::Number, vec![Value::Int64(4), Value::Int64(7)]),
//! ]);
//!
//! let out = reduce(&[frame], ReduceOptions::default().with_reducers(["max"])).unwrap();
//! assert_eq!(out[0].column("Field").unwrap().values(), &[Value::from("cpu")]);
//! assert_eq!(out[0].column("max").unwrap().values(), &[Value::Int64(7)]);
//! ```

#![no_std]

extern crate alloc;

mod calcs;
pub mod display;
pub mod infer;
pub mod matcher;
mod options;
pub mod reducer;
mod transform;

pub use display::display_name;
pub use infer::guess_type;
pub use matcher::{Matcher, MatcherConfig, MatcherOptions, MatcherRegistry};
pub use options::{ReduceMode, ReduceOptions, TransformerInfo};
pub use reducer::{ReducerInfo, ReducerKind, ReducerRegistry, ReducerResult};
pub use transform::{
    merge_frames, reduce, resolve_matcher, ReduceTransformer, FIELD_COLUMN_NAME, REDUCER_LABEL,
};
