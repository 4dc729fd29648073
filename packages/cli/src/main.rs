#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the incident proximity analysis pipeline.

mod pipeline;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use proximity_map_incident_models::{ProximityBreakpoints, YearRange};

#[derive(Parser)]
#[command(name = "proximity_map_cli", about = "Incident proximity analysis tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every pipeline-running subcommand.
#[derive(Args)]
struct PipelineArgs {
    /// Source identifier (e.g., "la" or "boston")
    #[arg(long)]
    source: String,
    /// Incident CSV file (repeat for yearly exports; file order is preserved)
    #[arg(long = "file", required = true)]
    files: Vec<PathBuf>,
    /// First year kept by the cleaner, inclusive
    #[arg(long, default_value = "2020")]
    min_year: i32,
    /// Last year kept by the cleaner, inclusive
    #[arg(long, default_value = "2024")]
    max_year: i32,
    /// Upper bound (exclusive) of the "close" distance bucket, in degrees
    #[arg(long, default_value = "0.02")]
    close: f64,
    /// Upper bound (exclusive) of the "medium" distance bucket, in degrees
    #[arg(long, default_value = "0.05")]
    medium: f64,
}

impl PipelineArgs {
    fn options(&self) -> pipeline::RunOptions {
        pipeline::RunOptions {
            source: self.source.clone(),
            files: self.files.clone(),
            year_range: YearRange::new(self.min_year, self.max_year),
            breakpoints: ProximityBreakpoints::new(self.close, self.medium),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print the run summary
    Run {
        #[command(flatten)]
        args: PipelineArgs,
    },
    /// Export the interactive heatmap HTML artifact
    Heatmap {
        #[command(flatten)]
        args: PipelineArgs,
        /// Output path for the self-contained HTML file
        #[arg(long, default_value = "heatmap.html")]
        output: PathBuf,
        /// Boundary `GeoJSON` file to overlay on the map
        #[arg(long)]
        boundary: Option<PathBuf>,
        /// Annotate this many top areas at their median coordinates
        #[arg(long)]
        annotate_top: Option<usize>,
    },
    /// Print the most (or least) frequent areas
    Areas {
        #[command(flatten)]
        args: PipelineArgs,
        /// Rank least frequent areas instead of most frequent
        #[arg(long)]
        bottom: bool,
        /// Number of areas to list
        #[arg(short, default_value = "5")]
        n: usize,
    },
    /// List all configured data sources
    Sources,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = proximity_map_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { args } => pipeline::run(&args.options(), &multi),
        Commands::Heatmap {
            args,
            output,
            boundary,
            annotate_top,
        } => pipeline::heatmap(
            &args.options(),
            &multi,
            pipeline::HeatmapArgs {
                output,
                boundary,
                annotate_top,
            },
        ),
        Commands::Areas { args, bottom, n } => pipeline::areas(&args.options(), &multi, bottom, n),
        Commands::Sources => {
            pipeline::list_sources();
            Ok(())
        }
    }
}
