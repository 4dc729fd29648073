//! Staged pipeline orchestration shared by the CLI subcommands.
//!
//! Every subcommand that touches incident data goes through the same
//! load-then-clean stages with injected configuration; the stages differ
//! only in what they do with the surviving records.

use std::path::PathBuf;

use proximity_map_analytics::{classify, clean, grouping, summary};
use proximity_map_cli_utils::{IndicatifProgress, MultiProgress};
use proximity_map_generate::{HeatmapOptions, write_heatmap};
use proximity_map_incident_models::{CleanIncident, ProximityBreakpoints, YearRange};
use proximity_map_source::csv_file::load_incidents;
use proximity_map_source::registry;
use proximity_map_source::source_def::SourceDefinition;

/// Configuration for one pipeline run, assembled entirely from CLI flags.
pub struct RunOptions {
    /// Source identifier from the registry.
    pub source: String,
    /// Input CSV files, in load order.
    pub files: Vec<PathBuf>,
    /// Inclusive year filter applied by the cleaner.
    pub year_range: YearRange,
    /// Distance breakpoints for proximity bucketing.
    pub breakpoints: ProximityBreakpoints,
}

/// Extra arguments for the heatmap subcommand.
pub struct HeatmapArgs {
    /// Output path for the HTML artifact.
    pub output: PathBuf,
    /// Optional boundary `GeoJSON` overlay.
    pub boundary: Option<PathBuf>,
    /// Annotate this many top areas.
    pub annotate_top: Option<usize>,
}

/// Loads and cleans incidents for the configured source.
fn load_and_clean(
    options: &RunOptions,
    multi: &MultiProgress,
) -> Result<(SourceDefinition, usize, Vec<CleanIncident>), Box<dyn std::error::Error>> {
    let def = registry::find_source(&options.source).ok_or_else(|| {
        format!(
            "Unknown source '{}' (run `sources` to list configured sources)",
            options.source
        )
    })?;

    let progress = IndicatifProgress::records_bar(multi, &format!("Loading {}", def.name));
    let raw = load_incidents(&def, &options.files, &progress)?;
    let raw_count = raw.len();
    let cleaned = clean(&raw, options.year_range);

    Ok((def, raw_count, cleaned))
}

/// Runs the full pipeline and prints the run summary.
///
/// # Errors
///
/// Returns an error if the source is unknown or a file cannot be loaded.
pub fn run(options: &RunOptions, multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let (def, raw_count, cleaned) = load_and_clean(options, multi)?;
    let classified = classify(cleaned, def.reference, options.breakpoints);
    let report = summary::summarize(raw_count, &classified);

    println!(
        "Run completed with {} records ({} raw rows read)",
        report.clean_count, report.raw_count
    );
    for category in &report.categories {
        println!("  {:<8} {}", category.category.as_ref(), category.count);
    }

    Ok(())
}

/// Runs the pipeline and exports the interactive heatmap artifact.
///
/// # Errors
///
/// Returns an error if loading fails or the artifact cannot be written.
pub fn heatmap(
    options: &RunOptions,
    multi: &MultiProgress,
    args: HeatmapArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (def, _raw_count, cleaned) = load_and_clean(options, multi)?;

    let heatmap_options = HeatmapOptions {
        title: format!(
            "Crime Heatmap for {} ({}-{})",
            def.city, options.year_range.min, options.year_range.max
        ),
        center: def.heatmap.center,
        zoom: def.heatmap.zoom,
        output_path: args.output,
        boundary_path: args.boundary,
        annotate_top: args.annotate_top,
    };

    let path = write_heatmap(&heatmap_options, &cleaned)?;
    println!("Heatmap created and saved at: {}", path.display());

    Ok(())
}

/// Runs the load/clean stages and prints the area frequency table.
///
/// # Errors
///
/// Returns an error if the source is unknown or a file cannot be loaded.
pub fn areas(
    options: &RunOptions,
    multi: &MultiProgress,
    bottom: bool,
    n: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_def, _raw_count, cleaned) = load_and_clean(options, multi)?;

    let (groups, records) = if bottom {
        grouping::bottom_areas(&cleaned, n)
    } else {
        grouping::top_areas(&cleaned, n)
    };

    if groups.is_empty() {
        println!("No labeled records survived cleaning");
        return Ok(());
    }

    for group in &groups {
        let subset = records
            .iter()
            .copied()
            .filter(|incident| incident.area.as_deref() == Some(group.label.as_str()));
        if let Some(anchor) = grouping::median_coordinate(subset) {
            println!(
                "{:>8}  {}  ({:.4}, {:.4})",
                group.count, group.label, anchor.latitude, anchor.longitude
            );
        } else {
            println!("{:>8}  {}", group.count, group.label);
        }
    }

    Ok(())
}

/// Prints every configured source definition.
pub fn list_sources() {
    for def in registry::all_sources() {
        println!(
            "{:<10} {} - {}, {} (reference {:.4}, {:.4})",
            def.id,
            def.name,
            def.city,
            def.state,
            def.reference.latitude,
            def.reference.longitude
        );
    }
}
