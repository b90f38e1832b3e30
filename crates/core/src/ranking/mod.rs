//! Merging and ordering of candidates from all sources

pub mod aggregator;

pub use aggregator::{Aggregator, merge_candidates};

use crate::impl_case_insensitive_deserialize;
use serde::Serialize;

/// How scores combine when several sources offer the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Keep the strongest single signal
    #[default]
    Max,
    /// Add the signals together
    Sum,
}

impl_case_insensitive_deserialize!(
    MergeStrategy,
    Max => "max",
    Sum => "sum"
);
