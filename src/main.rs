//! Groupsort CLI - sort CSV rows by a per-group aggregate
//!
//! # Commands
//!
//! ```bash
//! groupsort sort scores.csv sorted.csv average \
//!     --group-by "First Name" --group-by "Last Name" \
//!     --sort-field "Total Average Score" --separate-groups
//! groupsort sort scores.csv sorted.csv --options sort.json
//! groupsort parse scores.csv          # Just decode CSV to JSON rows
//! ```

use clap::{Parser, Subcommand};
use groupsort::{decode, sort_csv_file, Aggregate, SortOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "groupsort")]
#[command(about = "Sort CSV rows by a per-group aggregate value", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a CSV file by grouped aggregate
    Sort {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file
        output: PathBuf,

        /// Aggregate ordering the groups: min(imum), max(imum), avg/average
        #[arg(default_value = "average")]
        aggregate: Aggregate,

        /// Columns whose values (space-joined) form the group key
        #[arg(short, long = "group-by")]
        group_by: Vec<String>,

        /// Columns read as the per-row sort value (first parseable wins)
        #[arg(short, long = "sort-field")]
        sort_fields: Vec<String>,

        /// Number of leading header rows (the last one names the columns)
        #[arg(long, default_value = "1")]
        header_rows: usize,

        /// Sort ascending instead of descending
        #[arg(short, long)]
        ascending: bool,

        /// Put a blank row in front of every group
        #[arg(long)]
        separate_groups: bool,

        /// Skip the "Sort Value" annotation column
        #[arg(long)]
        no_annotate: bool,

        /// Load all options from a JSON file instead of flags
        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Decode a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sort {
            input,
            output,
            aggregate,
            group_by,
            sort_fields,
            header_rows,
            ascending,
            separate_groups,
            no_annotate,
            options,
        } => {
            let sort_options: Result<SortOptions, Box<dyn std::error::Error>> = match options {
                Some(path) => SortOptions::from_file(&path).map_err(Into::into),
                None => Ok(SortOptions {
                    header_rows,
                    group_by,
                    sort_fields,
                    aggregate,
                    ascending,
                    annotate: !no_annotate,
                    separate_groups,
                }),
            };
            sort_options.and_then(|opts| cmd_sort(&input, &output, &opts))
        }

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_sort(
    input: &Path,
    output: &Path,
    options: &SortOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Sorting: {}", input.display());
    eprintln!("   Group by: {}", options.group_by.join(" + "));
    eprintln!("   Sort field: {}", options.sort_fields.join(", "));
    eprintln!(
        "   Order: {:?} {}",
        options.aggregate,
        if options.ascending { "ascending" } else { "descending" }
    );

    sort_csv_file(input, output, options)?;

    eprintln!("💾 Output written to: {}", output.display());
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let text = fs::read_to_string(input)?;
    let rows = decode(&text);
    eprintln!("✅ Decoded {} rows", rows.len());

    let json = serde_json::to_string_pretty(&rows)?;
    write_output(&json, output)?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
