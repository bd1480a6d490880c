//! Frame structure for Tally.
//!
//! A frame is an ordered set of columns sharing one row count.

use crate::column::{Column, Labels};
use crate::error::{Error, Result};
use alloc::string::String;
use alloc::vec::Vec;

/// A table of equal-length columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    name: Option<String>,
    labels: Option<Labels>,
    columns: Vec<Column>,
    length: usize,
}

impl Frame {
    /// Creates an empty, unnamed frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frame from columns. The length is taken from the first column.
    pub fn with_columns(columns: Vec<Column>) -> Self {
        let length = columns.first().map_or(0, Column::len);
        Self {
            name: None,
            labels: None,
            columns,
            length,
        }
    }

    /// Sets the frame name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the frame labels.
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Appends a column. The first column pushed into an empty frame sets the length.
    pub fn push_column(&mut self, column: Column) {
        if self.columns.is_empty() {
            self.length = column.len();
        }
        self.columns.push(column);
    }

    /// Returns the frame name.
    #[inline]
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clears the frame name.
    pub fn clear_name(&mut self) {
        self.name = None;
    }

    /// Returns the frame labels.
    #[inline]
    pub fn get_labels(&self) -> Option<&Labels> {
        self.labels.as_ref()
    }

    /// Returns the columns.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the columns mutably.
    #[inline]
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Returns a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Returns the row count.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true when the frame has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Overrides the row count.
    pub fn set_len(&mut self, length: usize) {
        self.length = length;
    }

    /// Creates a frame that keeps this frame's name and labels but carries
    /// `columns` and `length` instead.
    pub fn with_same_attributes(&self, columns: Vec<Column>, length: usize) -> Self {
        Self {
            name: self.name.clone(),
            labels: self.labels.clone(),
            columns,
            length,
        }
    }

    /// Consumes the frame and returns its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Checks that every column holds exactly `len()` values.
    pub fn validate(&self) -> Result<()> {
        for column in &self.columns {
            if column.len() != self.length {
                return Err(Error::length_mismatch(
                    column.name(),
                    self.length,
                    column.len(),
                ));
            }
        }
        Ok(())
    }
}
