//! Cropscope CLI - bias-corrected cropland area estimation.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Adjust {
            gross,
            net,
            great_plains,
            southern,
            output,
        } => commands::adjust::run(gross, net, great_plains, southern, output, cli.verbose),

        Commands::Report {
            file,
            footprint,
            region,
            json,
        } => commands::report::run(file, footprint, region, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
