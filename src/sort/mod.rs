//! Grouped-sort module.
//!
//! This module turns decoded CSV rows into regrouped, reordered rows:
//! - Aggregate: functions reducing a group's sort fields to one value
//! - Engine: the grouping and two-level sort itself
//! - Pipeline: file-level orchestration and the options bundle

pub mod aggregate;
pub mod engine;
pub mod pipeline;

pub use aggregate::Aggregate;
pub use engine::{keep_group_rows, sort_rows_by_group, EngineConfig};
pub use pipeline::*;
