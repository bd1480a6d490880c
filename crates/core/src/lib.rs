//! Tally Core - Frame, column and value types for the Tally reduction engine.
//!
//! This crate provides the foundational types shared by every Tally crate:
//!
//! - `FieldType`: Logical column types (Number, String, Time, Boolean, Other)
//! - `Value`: Scalar cell values
//! - `Column`: A named, typed value sequence with display config, labels and transient state
//! - `Frame`: An ordered set of equal-length columns
//! - `pattern`: Compiled name patterns used by column matchers
//! - `Error`: Error types for reduction and its collaborators
//!
//! # Example
//!
//! ```rust
//! use tally_core::{Column, FieldType, Frame, Value};
//!
//! let frame = Frame::with_columns(vec![
//!     Column::with_values("Time", FieldType::Time, vec![Value::Time(1), Value::Time(2)]),
//!     Column::with_values("cpu", FieldType::Number, vec![Value::Float64(0.5), Value::Float64(0.7)]),
//! ])
//! .name("host-a");
//!
//! assert_eq!(frame.len(), 2);
//! assert_eq!(frame.column("cpu").map(|c| c.field_type()), Some(FieldType::Number));
//! assert!(frame.validate().is_ok());
//! ```

#![no_std]

extern crate alloc;

mod column;
mod error;
mod frame;
pub mod pattern;
mod types;
mod value;

pub use column::{format_labels, Column, ColumnConfig, ColumnState, Labels, NullValueMode};
pub use error::{Error, Result};
pub use frame::Frame;
pub use types::FieldType;
pub use value::Value;
