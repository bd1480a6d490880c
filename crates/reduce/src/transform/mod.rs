//! The reduce transformer.
//!
//! Collapses the selected columns of every frame to reducer results and lays
//! them out either as one row per column (`SeriesToRows`) or as single-row
//! columns (`ReduceField`).

mod merge;
mod reduce_field;
mod series_to_rows;

pub use merge::merge_frames;
pub use reduce_field::REDUCER_LABEL;
pub use series_to_rows::FIELD_COLUMN_NAME;

use crate::matcher::{always_matcher, not_time_matcher, Matcher, MatcherRegistry};
use crate::options::{ReduceMode, ReduceOptions, TransformerInfo};
use crate::reducer::ReducerRegistry;
use alloc::vec::Vec;
use tally_core::{Frame, Result};

/// Picks the column predicate for a run.
///
/// An explicit `fields` config always wins. Otherwise `ReduceField` runs that
/// opt into time columns select everything, and every other run skips time
/// columns.
pub fn resolve_matcher(options: &ReduceOptions, registry: &MatcherRegistry) -> Result<Matcher> {
    if let Some(fields) = &options.fields {
        return registry.get(fields);
    }
    if options.mode == ReduceMode::ReduceField && options.include_time_field {
        return Ok(always_matcher());
    }
    Ok(not_time_matcher())
}

/// Reduces frames according to [`ReduceOptions`].
#[derive(Clone, Debug)]
pub struct ReduceTransformer {
    options: ReduceOptions,
    matchers: MatcherRegistry,
    reducers: ReducerRegistry,
}

impl ReduceTransformer {
    /// Description of this transformer.
    pub const INFO: TransformerInfo = TransformerInfo {
        id: "reduce",
        name: "Reduce",
        description: "Reduce all rows or data points to a single value using a function like max, min, mean or last",
    };

    /// Creates a transformer backed by the standard registries.
    pub fn new(options: ReduceOptions) -> Self {
        Self::with_registries(options, MatcherRegistry::standard(), ReducerRegistry::standard())
    }

    /// Creates a transformer backed by custom registries.
    pub fn with_registries(
        options: ReduceOptions,
        matchers: MatcherRegistry,
        reducers: ReducerRegistry,
    ) -> Self {
        Self {
            options,
            matchers,
            reducers,
        }
    }

    /// Returns the options.
    #[inline]
    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    /// Runs the transformer over `frames`. Inputs are never modified.
    pub fn transform(&self, frames: &[Frame]) -> Result<Vec<Frame>> {
        let reducer_ids = self.options.unique_reducers();
        // unknown ids fail before any frame is touched
        self.reducers.list(&reducer_ids)?;
        let matcher = resolve_matcher(&self.options, &self.matchers)?;

        log::debug!(
            "reduce: mode={:?} reducers={} frames={}",
            self.options.mode,
            reducer_ids.len(),
            frames.len()
        );

        match self.options.mode {
            ReduceMode::ReduceField => {
                reduce_field::reduce_fields(frames, &matcher, &self.reducers, &reducer_ids)
            }
            ReduceMode::SeriesToRows => {
                let reduced =
                    series_to_rows::reduce_series_to_rows(frames, &matcher, &self.reducers, &reducer_ids)?;
                Ok(merge_frames(reduced))
            }
        }
    }
}

/// Reduces `frames` with the standard registries.
pub fn reduce(frames: &[Frame], options: ReduceOptions) -> Result<Vec<Frame>> {
    ReduceTransformer::new(options).transform(frames)
}
