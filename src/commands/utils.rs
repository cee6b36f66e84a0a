use crate::parser::load_dataset;
use crate::report::{build_index, format_function, SortKey};
use crate::report::format::format_time;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a stats artifact and print a short summary
pub fn validate_stats_file(file_path: PathBuf) -> Result<()> {
    println!("Validating stats: {}", file_path.display());

    let dataset = load_dataset(&file_path)?;

    println!("✓ Valid stats JSON");
    println!("  Artifacts: {}", dataset.files().join(", "));
    println!("  Functions: {}", dataset.registry().len());
    println!("  Total Time: {}", format_time(dataset.total_time()));

    let rows = build_index(&dataset, SortKey::InclusiveTime, None)?;
    if !rows.is_empty() {
        println!("  Top functions by inclusive time:");
        for row in rows.iter().take(5) {
            println!(
                "    {:>10}  {}",
                format_time(row.totals.inclusive_time),
                format_function(row.function)
            );
        }
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Callprof Viewer Stats Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  files: array?              - Names of the profiler outputs");
        println!("  functions: array           - One entry per profiled function");
        println!("    file: string             - Source file path");
        println!("    line: number             - Definition line");
        println!("    name: string             - Symbol name");
        println!("    primitive_calls: number  - Non-recursive calls");
        println!("    total_calls: number      - All calls");
        println!("    exclusive_time: number   - Seconds in the function body");
        println!("    inclusive_time: number   - Seconds including callees");
        println!("    callers: array?          - Edges into this function");
        println!("      file, line, name       - Calling function");
        println!("      primitive_calls, total_calls, exclusive_time, inclusive_time");
        println!("                             - Figures for this edge");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Callprof Viewer v{}", env!("CARGO_PKG_VERSION"));
    println!("Stats Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("A browsable HTML report server for captured call profiles.");
}
