//! Report command - inspect a saved result document without recomputing.

use std::path::PathBuf;

use colored::Colorize;
use cropscope::{report, CombinedResult, Footprint};

pub fn run(
    file: PathBuf,
    footprint: Option<Footprint>,
    region: Option<String>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!(
            "Result file not found: {}\nRun 'cropscope adjust' first.",
            file.display()
        )
        .into());
    }

    let result = CombinedResult::load(&file)?;

    // Apply footprint/region filters to the flattened view
    let rows: Vec<_> = report::flatten(&result)
        .into_iter()
        .filter(|r| footprint.map(|f| r.footprint == f).unwrap_or(true))
        .filter(|r| region.as_deref().map(|k| r.region_key == k).unwrap_or(true))
        .collect();

    if rows.is_empty() {
        return Err("No series match the requested footprint/region".into());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} {} (computed {})",
        "Results from".cyan().bold(),
        file.display().to_string().white(),
        result.computed_at.format("%Y-%m-%d %H:%M UTC")
    );

    if verbose && !result.inputs.is_empty() {
        println!();
        println!("{}", "Inputs:".yellow().bold());
        for input in &result.inputs {
            println!("  {} ({} rows, {})", input.path, input.rows, input.sha256);
        }
    }

    println!();
    println!(
        "{:>6} {:>13} {:>6} {:>14} {:>14} {:>12}  {}",
        "fp", "region", "year", "observed", "adjusted", "se", "flag"
    );
    for row in &rows {
        let flag = if row.low_confidence {
            "low-confidence".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "{:>6} {:>13} {:>6} {:>14.4} {:>14.4} {:>12.4}  {}",
            row.footprint.to_string(),
            row.region_key,
            row.year,
            row.observed,
            row.adjusted,
            row.standard_error,
            flag
        );
    }

    Ok(())
}
