//! # Groupsort - grouped CSV sorting
//!
//! Groupsort reads a CSV file, partitions its data rows into groups by a
//! derived key, reduces each group's numeric sort fields to one aggregate
//! value, orders the groups by that value and writes the regrouped rows back
//! out as CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│    Codec    │────▶│ Sort Engine │────▶│   CSV File  │
//! │   (input)   │     │ (rows in)   │     │ (regrouped) │     │  (output)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use groupsort::{sort_csv, Aggregate, SortOptions};
//!
//! let options = SortOptions {
//!     header_rows: 1,
//!     group_by: vec!["Name".to_string()],
//!     sort_fields: vec!["Score".to_string()],
//!     aggregate: Aggregate::Average,
//!     ascending: true,
//!     annotate: false,
//!     separate_groups: false,
//! };
//! let sorted = sort_csv("Name,Score\nA,10\nB,5\nA,20", &options).unwrap();
//! assert_eq!(sorted, "Name,Score\nB,5\nA,10\nA,20");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Domain models (Row, RowRecord, Group)
//! - [`codec`] - Hand-written CSV decode/encode
//! - [`sort`] - Aggregates, the grouped-sort engine and the file pipeline

// Core modules
pub mod error;
pub mod models;

// CSV codec
pub mod codec;

// Grouped sort
pub mod sort;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, PipelineError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Group, GroupMember, GroupSortValue, Row, RowRecord};

// =============================================================================
// Re-exports - Codec
// =============================================================================

pub use codec::{decode, encode};

// =============================================================================
// Re-exports - Sort
// =============================================================================

pub use sort::{
    keep_group_rows, sort_csv, sort_csv_file, sort_rows_by_group, Aggregate, EngineConfig,
    SortOptions, SORT_VALUE_COLUMN,
};
