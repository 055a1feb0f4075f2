//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cropscope::Footprint;

/// Cropscope: bias-corrected cropland area estimation
#[derive(Parser)]
#[command(name = "cropscope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the estimation pipeline and save the result document
    Adjust {
        /// Gross (cumulative footprint) observed-area CSV
        #[arg(long, value_name = "CSV")]
        gross: PathBuf,

        /// Net (active footprint) observed-area CSV
        #[arg(long, value_name = "CSV")]
        net: PathBuf,

        /// Great Plains validation point CSV
        #[arg(long, value_name = "CSV")]
        great_plains: PathBuf,

        /// Southern subregion validation point CSV
        #[arg(long, value_name = "CSV")]
        southern: PathBuf,

        /// Output path for the result document
        #[arg(
            short,
            long,
            default_value = "corrected_cropland_area_estimates.json"
        )]
        output: PathBuf,
    },

    /// Inspect a previously saved result document without recomputing
    Report {
        /// Path to a saved result document (JSON)
        #[arg(value_name = "RESULT_FILE")]
        file: PathBuf,

        /// Restrict output to one footprint type (gross or net)
        #[arg(short, long)]
        footprint: Option<Footprint>,

        /// Restrict output to one region key (e.g. great_plains, combined)
        #[arg(short, long)]
        region: Option<String>,

        /// Output as JSON rows instead of a table
        #[arg(long)]
        json: bool,
    },
}
