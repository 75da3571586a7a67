//! The grouped-sort engine.
//!
//! Transforms a decoded row sequence into a regrouped, reordered one:
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌────────────┐   ┌─────────┐
//! │   rows   │──▶│ group by │──▶│ sort rows │──▶│ order      │──▶│ flatten │
//! │ (header  │   │ group    │   │ inside    │   │ groups by  │   │ via     │
//! │  split)  │   │ key      │   │ each group│   │ aggregate  │   │ hook    │
//! └──────────┘   └──────────┘   └───────────┘   └────────────┘   └─────────┘
//! ```
//!
//! The engine is parameterized by injected strategy functions (group key,
//! sort field, aggregate, group transform) and never raises: irregular data
//! reads as missing values, and the caller is assumed to have validated its
//! configuration up front.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::{Group, GroupMember, GroupSortValue, Row, RowRecord};

/// Strategy functions and settings driving one grouped sort.
pub struct EngineConfig<'a> {
    /// Number of leading header rows. The last of them names the columns;
    /// any earlier ones (title or metadata lines) pass through untouched,
    /// first in the output, and never join a group.
    pub header_rows: usize,

    /// Derives the group key for a data row. Rows with equal keys (exact
    /// string equality) land in the same group.
    pub get_group_field: Box<dyn Fn(&RowRecord) -> String + 'a>,

    /// Derives the per-row sort field; `None` marks it missing.
    pub get_sort_field: Box<dyn Fn(&RowRecord) -> Option<f64> + 'a>,

    /// Reduces a group's non-missing sort fields to its ordering value.
    pub aggregate: Box<dyn Fn(&[f64]) -> f64 + 'a>,

    /// Direction for both the within-group and the across-group ordering.
    pub ascending: bool,

    /// Invoked once per group (the synthetic header group included) after
    /// ordering; may reorder, annotate, duplicate or add synthetic records.
    pub transform_group: Box<dyn Fn(Group, GroupSortValue) -> Vec<RowRecord> + 'a>,
}

/// The default group transform: emit the group's records as they are.
pub fn keep_group_rows(group: Group, _sort_value: GroupSortValue) -> Vec<RowRecord> {
    group.members.into_iter().map(|m| m.record).collect()
}

/// Regroup and reorder decoded rows.
///
/// 1. Split off the passthrough prefix and the header row.
/// 2. Pair each data row with the header and partition by group key,
///    preserving first-seen order inside each group.
/// 3. Sort each group's members by sort field (missing compares as `0`).
/// 4. Reduce each group's non-missing sort fields through the aggregate and
///    order the groups by the result; ties keep first-appearance order.
/// 5. Prepend the header as its own group, run the group transform over
///    every group and flatten the records back to rows.
///
/// A file too short to contain the header row comes back unchanged.
pub fn sort_rows_by_group(all_rows: Vec<Row>, config: &EngineConfig) -> Vec<Row> {
    let header_index = config.header_rows.saturating_sub(1);
    if all_rows.len() <= header_index {
        return all_rows;
    }

    let mut skipped = all_rows;
    let data_rows = skipped.split_off(header_index + 1);
    let header_row = skipped.pop().unwrap_or_default();
    let headers: Rc<[String]> = header_row.iter().cloned().collect();
    let header_record = RowRecord::new(Rc::clone(&headers), header_row);

    // Partition into groups, insertion-ordered both across first-seen keys
    // and inside each member list.
    let mut key_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<GroupMember>> = HashMap::new();
    for row in data_rows {
        let record = RowRecord::new(Rc::clone(&headers), row);
        let key = (config.get_group_field)(&record);
        let sort_field = (config.get_sort_field)(&record);
        let member = GroupMember { record, sort_field };
        match groups.get_mut(&key) {
            Some(members) => members.push(member),
            None => {
                key_order.push(key.clone());
                groups.insert(key, vec![member]);
            }
        }
    }

    // Within-group ordering, then one aggregate value per group.
    let mut ordered: Vec<(Group, f64)> = key_order
        .into_iter()
        .filter_map(|key| groups.remove(&key).map(|members| Group { key, members }))
        .map(|mut group| {
            group.members.sort_by(|a, b| {
                compare_values(
                    a.sort_field.unwrap_or(0.0),
                    b.sort_field.unwrap_or(0.0),
                    config.ascending,
                )
            });
            let values: Vec<f64> = group.members.iter().filter_map(|m| m.sort_field).collect();
            let sort_value = (config.aggregate)(&values);
            (group, sort_value)
        })
        .collect();

    // Across-group ordering; sort_by is stable, so equal aggregates keep
    // first-appearance order.
    ordered.sort_by(|a, b| compare_values(a.1, b.1, config.ascending));

    let header_group = Group {
        key: String::new(),
        members: vec![GroupMember {
            record: header_record,
            sort_field: None,
        }],
    };

    let mut out_rows = skipped;
    out_rows.extend(
        std::iter::once((header_group, GroupSortValue::Header))
            .chain(
                ordered
                    .into_iter()
                    .map(|(group, value)| (group, GroupSortValue::Value(value))),
            )
            .flat_map(|(group, value)| (config.transform_group)(group, value))
            .map(RowRecord::into_row),
    );
    out_rows
}

/// Numeric comparison with the configured direction. Incomparable values
/// (NaN from a misbehaving sort-field hook) compare equal, which degrades the
/// ordering without panicking.
fn compare_values(a: f64, b: f64, ascending: bool) -> Ordering {
    let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    if ascending {
        ord
    } else {
        ord.reverse()
    }
}
