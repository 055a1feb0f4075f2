//! Adjust command - run the estimation pipeline and save the result.

use std::path::PathBuf;

use colored::Colorize;
use cropscope::{report, Cropscope, Footprint, InputPaths, Region, COMBINED_KEY};

pub fn run(
    gross: PathBuf,
    net: PathBuf,
    great_plains: PathBuf,
    southern: PathBuf,
    output: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input files exist up front
    for path in [&gross, &net, &great_plains, &southern] {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()).into());
        }
    }

    println!(
        "{} gross={} net={}",
        "Estimating".cyan().bold(),
        gross.display().to_string().white(),
        net.display().to_string().white()
    );

    let paths = InputPaths::new(&gross, &net)
        .with_points(Region::GreatPlains, &great_plains)
        .with_points(Region::Southern, &southern);

    let pipeline = Cropscope::new();
    let result = pipeline.run(&paths)?;

    if verbose {
        println!();
        print!("{}", report::render_summary(&result));
    }

    // Flag summary across all series
    let rows = report::flatten(&result);
    let flagged = rows.iter().filter(|r| r.low_confidence).count();

    for footprint in Footprint::all() {
        let combined = result
            .series(footprint, COMBINED_KEY)
            .map(|s| s.len())
            .unwrap_or(0);
        println!(
            "{} footprint: {} combined years",
            footprint.to_string().white().bold(),
            combined.to_string().white()
        );
    }

    if flagged > 0 {
        println!(
            "{} {} low-confidence series entries (undersampled strata)",
            "Warning:".yellow().bold(),
            flagged.to_string().yellow()
        );
    }

    result.save(&output)?;
    println!(
        "{} {}",
        "Saved".green().bold(),
        output.display().to_string().white()
    );

    Ok(())
}
