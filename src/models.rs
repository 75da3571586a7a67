//! Domain models for the grouped-sort pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`Row`] - an ordered sequence of CSV field strings, positional
//! - [`RowRecord`] - a row paired with a header-keyed field lookup
//! - [`Group`] - records sharing a group key, in source order
//! - [`GroupSortValue`] - the value a group is ordered by (header sentinel or number)

use std::rc::Rc;

/// One CSV row: an ordered sequence of field strings with no implicit schema.
pub type Row = Vec<String>;

// =============================================================================
// Row Records
// =============================================================================

/// A data row paired with the header row naming its columns.
///
/// Field lookup zips the header with the row positionally: fields beyond the
/// header length are unreachable by name (but stay in the row), and fields
/// past the end of a short row read as absent. The header is shared, the row
/// is owned, and nothing is cached across rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    headers: Rc<[String]>,
    row: Row,
}

impl RowRecord {
    /// Pair a row with the header row in effect for its file.
    pub fn new(headers: Rc<[String]>, row: Row) -> Self {
        Self { headers, row }
    }

    /// Look up a field value by column name.
    ///
    /// Returns `None` when the column is not in the header or the row is too
    /// short to reach it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.column_index(name)
            .and_then(|i| self.row.get(i))
            .map(String::as_str)
    }

    /// Position of a named column in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Insert a field value at `index`, clamped to the row length.
    pub fn insert_field(&mut self, index: usize, value: String) {
        let at = index.min(self.row.len());
        self.row.insert(at, value);
    }

    /// An empty row sharing this record's header (a blank separator line).
    pub fn blank_like(&self) -> RowRecord {
        RowRecord::new(Rc::clone(&self.headers), Vec::new())
    }

    /// The underlying row fields.
    pub fn row(&self) -> &Row {
        &self.row
    }

    /// Extract the underlying row.
    pub fn into_row(self) -> Row {
        self.row
    }
}

// =============================================================================
// Groups
// =============================================================================

/// One member of a group: its record plus the sort field derived from it.
///
/// A missing sort field (absent column, unparseable value) is `None`; it
/// compares as `0.0` within the group but is excluded from the aggregate.
#[derive(Debug, Clone)]
pub struct GroupMember {
    pub record: RowRecord,
    pub sort_field: Option<f64>,
}

/// A set of records sharing the same group key.
///
/// Members keep their source order until the within-group sort runs.
#[derive(Debug, Clone)]
pub struct Group {
    pub key: String,
    pub members: Vec<GroupMember>,
}

/// The value a group is ordered by.
///
/// The header row travels through the pipeline as a synthetic group of its
/// own; the `Header` variant marks it so transforms can recognize it and it
/// always stays first regardless of sort direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupSortValue {
    /// The synthetic header group, always ordered first.
    Header,
    /// A data group's aggregated sort value.
    Value(f64),
}

impl GroupSortValue {
    pub fn is_header(&self) -> bool {
        matches!(self, GroupSortValue::Header)
    }
}
