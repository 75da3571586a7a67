//! File-level orchestration: read, decode, sort, encode, write.
//!
//! [`SortOptions`] is the resolved configuration bundle the engine is driven
//! by. It can be built from CLI flags or loaded from a JSON file, and is
//! turned into the engine's strategy functions here: the group key joins the
//! configured name columns with a space, the sort field is the first
//! configured column holding a parseable number, and the default group
//! transform annotates rows with the group's computed value and optionally
//! separates groups with a blank line.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::codec;
use crate::error::{ConfigError, PipelineError};
use crate::models::{Group, GroupSortValue, RowRecord};
use crate::sort::aggregate::Aggregate;
use crate::sort::engine::{sort_rows_by_group, EngineConfig};

/// Header name of the column the sort-value annotation is written to.
pub const SORT_VALUE_COLUMN: &str = "Sort Value";

/// Options bundle for one grouped sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SortOptions {
    /// Number of leading header rows; the last one names the columns,
    /// earlier ones pass through untouched.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,

    /// Columns whose values, joined with a space, form the group key.
    pub group_by: Vec<String>,

    /// Sort-field columns; the first one holding a parseable number wins.
    pub sort_fields: Vec<String>,

    /// Aggregate reducing a group's sort fields to its ordering value.
    pub aggregate: Aggregate,

    /// Sort direction for rows within a group and for the groups themselves.
    #[serde(default)]
    pub ascending: bool,

    /// Insert a column carrying the group's computed value right after the
    /// first sort-field column.
    #[serde(default = "default_true")]
    pub annotate: bool,

    /// Put a blank row in front of every data group.
    #[serde(default)]
    pub separate_groups: bool,
}

fn default_header_rows() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl SortOptions {
    /// Load options from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let options: SortOptions = serde_json::from_str(&content)?;
        Ok(options)
    }

    /// Caller-side validation, run before the engine is invoked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_by.is_empty() {
            return Err(ConfigError::NoGroupColumns);
        }
        if self.sort_fields.is_empty() {
            return Err(ConfigError::NoSortFieldColumns);
        }
        Ok(())
    }

    /// Resolve the options into the engine's strategy functions.
    fn resolve(&self) -> EngineConfig<'_> {
        let group_by = &self.group_by;
        let sort_fields = &self.sort_fields;
        let aggregate = self.aggregate;
        let annotate = self.annotate;
        let separate_groups = self.separate_groups;

        EngineConfig {
            header_rows: self.header_rows,
            get_group_field: Box::new(move |record| {
                group_by
                    .iter()
                    .map(|name| record.get(name).unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join(" ")
            }),
            get_sort_field: Box::new(move |record| {
                sort_fields
                    .iter()
                    .find_map(|name| record.get(name).and_then(|v| v.trim().parse::<f64>().ok()))
            }),
            aggregate: Box::new(move |values| aggregate.apply(values)),
            ascending: self.ascending,
            transform_group: Box::new(move |mut group: Group, value: GroupSortValue| {
                if annotate {
                    annotate_group(&mut group, value, sort_fields);
                }
                let mut records: Vec<RowRecord> = Vec::with_capacity(group.members.len() + 1);
                if separate_groups && !value.is_header() {
                    records.push(group.members[0].record.blank_like());
                }
                records.extend(group.members.into_iter().map(|m| m.record));
                records
            }),
        }
    }
}

/// Write the group's sort value into every member row, right after the first
/// sort-field column (or at the front when none of them is in the header).
/// The header row gets the column name instead of a number.
fn annotate_group(group: &mut Group, value: GroupSortValue, sort_fields: &[String]) {
    let label = match value {
        GroupSortValue::Header => SORT_VALUE_COLUMN.to_string(),
        GroupSortValue::Value(v) => format!("{}", v),
    };
    for member in &mut group.members {
        let at = sort_fields
            .iter()
            .find_map(|name| member.record.column_index(name))
            .map(|i| i + 1)
            .unwrap_or(0);
        member.record.insert_field(at, label.clone());
    }
}

/// Sort CSV text by grouped aggregate and return the sorted CSV text.
pub fn sort_csv(text: &str, options: &SortOptions) -> Result<String, PipelineError> {
    options.validate()?;
    let rows = codec::decode(text);
    let config = options.resolve();
    let sorted = sort_rows_by_group(rows, &config);
    Ok(codec::encode(&sorted))
}

/// Read `input`, sort its rows by grouped aggregate, write the result to
/// `output`. The input is read to completion before decoding starts and the
/// output is written in one piece after encoding; I/O failures propagate
/// unchanged.
pub fn sort_csv_file(
    input: &Path,
    output: &Path,
    options: &SortOptions,
) -> Result<(), PipelineError> {
    options.validate()?;
    let text = fs::read_to_string(input)?;
    let sorted = sort_csv(&text, options)?;
    fs::write(output, sorted)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SortOptions {
        SortOptions {
            header_rows: 1,
            group_by: vec!["Name".to_string()],
            sort_fields: vec!["Score".to_string()],
            aggregate: Aggregate::Average,
            ascending: true,
            annotate: false,
            separate_groups: false,
        }
    }

    #[test]
    fn test_sort_by_average_ascending() {
        let input = "Name,Score\nA,10\nB,5\nA,20";
        let output = sort_csv(input, &options()).unwrap();
        assert_eq!(output, "Name,Score\nB,5\nA,10\nA,20");
    }

    #[test]
    fn test_annotation_column_inserted_after_sort_field() {
        let mut opts = options();
        opts.annotate = true;
        let input = "Name,Score\nA,10\nB,5\nA,20";
        let output = sort_csv(input, &opts).unwrap();
        assert_eq!(
            output,
            "Name,Score,Sort Value\nB,5,5\nA,10,15\nA,20,15"
        );
    }

    #[test]
    fn test_blank_line_between_groups() {
        let mut opts = options();
        opts.separate_groups = true;
        let input = "Name,Score\nA,10\nB,5";
        let output = sort_csv(input, &opts).unwrap();
        assert_eq!(output, "Name,Score\n\nB,5\n\nA,10");
    }

    #[test]
    fn test_group_key_joins_columns_with_space() {
        let mut opts = options();
        opts.group_by = vec!["First".to_string(), "Last".to_string()];
        opts.sort_fields = vec!["Score".to_string()];
        opts.aggregate = Aggregate::Min;
        let input = "First,Last,Score\nAda,Lovelace,2\nAda,Byron,1\nAda,Lovelace,3";
        let output = sort_csv(input, &opts).unwrap();
        // "Ada Byron" (1) sorts before "Ada Lovelace" (2).
        assert_eq!(
            output,
            "First,Last,Score\nAda,Byron,1\nAda,Lovelace,2\nAda,Lovelace,3"
        );
    }

    #[test]
    fn test_sort_field_fallback_first_parseable_wins() {
        let mut opts = options();
        opts.sort_fields = vec!["Primary".to_string(), "Backup".to_string()];
        opts.aggregate = Aggregate::Min;
        let input = "Name,Primary,Backup\nA,,7\nB,3,9";
        let output = sort_csv(input, &opts).unwrap();
        // A's primary is empty, so its backup value 7 is the sort field and
        // B (3) comes first.
        assert_eq!(output, "Name,Primary,Backup\nB,3,9\nA,,7");
    }

    #[test]
    fn test_non_numeric_sort_field_is_missing() {
        let mut opts = options();
        opts.aggregate = Aggregate::Min;
        let input = "Name,Score\nA,n/a\nB,-1\nC,1";
        let output = sort_csv(input, &opts).unwrap();
        // A's group has no parseable value and aggregates to 0.
        assert_eq!(output, "Name,Score\nB,-1\nA,n/a\nC,1");
    }

    #[test]
    fn test_title_rows_pass_through() {
        let mut opts = options();
        opts.header_rows = 2;
        let input = "Season results\nName,Score\nA,2\nB,1";
        let output = sort_csv(input, &opts).unwrap();
        assert_eq!(output, "Season results\nName,Score\nB,1\nA,2");
    }

    #[test]
    fn test_descending_direction() {
        let mut opts = options();
        opts.ascending = false;
        let input = "Name,Score\nB,5\nA,10\nA,20";
        let output = sort_csv(input, &opts).unwrap();
        assert_eq!(output, "Name,Score\nA,20\nA,10\nB,5");
    }

    #[test]
    fn test_quoted_fields_survive_the_round_trip() {
        let input = "Name,Score\n\"Smith, Jane\",2\nBob,1";
        let output = sort_csv(input, &options()).unwrap();
        assert_eq!(output, "Name,Score\nBob,1\n\"Smith, Jane\",2");
    }

    #[test]
    fn test_validation_rejects_empty_column_lists() {
        let mut opts = options();
        opts.group_by.clear();
        assert!(matches!(
            sort_csv("Name,Score\nA,1", &opts),
            Err(PipelineError::Config(ConfigError::NoGroupColumns))
        ));

        let mut opts = options();
        opts.sort_fields.clear();
        assert!(matches!(
            sort_csv("Name,Score\nA,1", &opts),
            Err(PipelineError::Config(ConfigError::NoSortFieldColumns))
        ));
    }

    #[test]
    fn test_options_from_json() {
        let json = r#"{
            "group_by": ["First Name", "Last Name"],
            "sort_fields": ["Total Average Score"],
            "aggregate": "avg",
            "separate_groups": true
        }"#;
        let opts: SortOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.header_rows, 1);
        assert_eq!(opts.aggregate, Aggregate::Average);
        assert!(!opts.ascending);
        assert!(opts.annotate);
        assert!(opts.separate_groups);
    }

    #[test]
    fn test_sort_csv_file_round_trip() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("groupsort-test-in-{}.csv", std::process::id()));
        let output = dir.join(format!("groupsort-test-out-{}.csv", std::process::id()));
        fs::write(&input, "Name,Score\nA,10\nB,5\nA,20").unwrap();

        sort_csv_file(&input, &output, &options()).unwrap();
        let sorted = fs::read_to_string(&output).unwrap();
        assert_eq!(sorted, "Name,Score\nB,5\nA,10\nA,20");

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_missing_input_file_fails() {
        let missing = std::env::temp_dir().join("groupsort-does-not-exist.csv");
        let out = std::env::temp_dir().join("groupsort-unused-out.csv");
        let result = sort_csv_file(&missing, &out, &options());
        assert!(matches!(result, Err(PipelineError::Io(_))));
    }
}
