//! CSV file reader for incident exports.
//!
//! Reads a city's incident CSV files (optionally gzip-compressed), maps the
//! configured columns, and produces [`RawIncident`] rows. Row order within a
//! file and file order among files are preserved, so downstream stages see
//! records exactly as the exports list them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use proximity_map_incident_models::RawIncident;

use crate::SourceError;
use crate::parsing::parse_coordinate;
use crate::progress::ProgressCallback;
use crate::source_def::{FieldMapping, SourceDefinition};

/// Resolved column positions for one CSV file's header row.
struct ColumnIndices {
    lat: usize,
    lng: usize,
    occurred_at: usize,
    area: Option<usize>,
    weapon: Option<usize>,
}

impl ColumnIndices {
    /// Resolves the configured column names against a header row.
    ///
    /// The coordinate and timestamp columns are required; the label and
    /// weapon columns are optional and merely logged when absent.
    fn resolve(
        headers: &[String],
        fields: &FieldMapping,
        path: &Path,
    ) -> Result<Self, SourceError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| SourceError::Schema {
                message: format!("{}: missing required column '{name}'", path.display()),
            })
        };

        let optional = |name: Option<&String>| {
            name.and_then(|name| {
                let idx = find(name);
                if idx.is_none() {
                    log::warn!("{}: optional column '{name}' not found", path.display());
                }
                idx
            })
        };

        Ok(Self {
            lat: require(&fields.lat)?,
            lng: require(&fields.lng)?,
            occurred_at: require(fields.occurred_at.field())?,
            area: optional(fields.area.as_ref()),
            weapon: optional(fields.weapon.as_ref()),
        })
    }
}

/// Loads every file for a source, concatenating rows in file order.
///
/// # Errors
///
/// Returns [`SourceError`] if a file is missing or unreadable, its CSV
/// structure is malformed, or its header lacks a required mapped column.
/// Load errors are fatal for the run; cell-level problems (bad coordinate,
/// unparseable timestamp) only null the affected field on that row.
pub fn load_incidents(
    def: &SourceDefinition,
    paths: &[PathBuf],
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<RawIncident>, SourceError> {
    let mut incidents = Vec::new();

    for (i, path) in paths.iter().enumerate() {
        log::info!(
            "[{}] Reading CSV {}/{}: {}",
            def.id,
            i + 1,
            paths.len(),
            path.display()
        );
        progress.set_message(format!("[{}] {}", def.id, path.display()));

        let count = load_file(def, path, &mut incidents, progress)?;

        log::info!(
            "[{}] CSV {}/{}: {count} rows (total so far: {})",
            def.id,
            i + 1,
            paths.len(),
            incidents.len()
        );
    }

    progress.finish(format!(
        "[{}] load complete -- {} rows",
        def.id,
        incidents.len()
    ));

    Ok(incidents)
}

/// Opens a file for reading, transparently decompressing `.gz` inputs.
fn open_reader(path: &Path) -> Result<Box<dyn Read>, SourceError> {
    let file = File::open(path)?;
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    {
        Ok(Box::new(flate2::read::GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Reads one CSV file, appending its rows to `incidents` in file order.
fn load_file(
    def: &SourceDefinition,
    path: &Path,
    incidents: &mut Vec<RawIncident>,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<u64, SourceError> {
    let reader = open_reader(path)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(reader));

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.is_empty() {
        return Err(SourceError::Schema {
            message: format!("{}: CSV file contains no header row", path.display()),
        });
    }

    let columns = ColumnIndices::resolve(&headers, &def.fields, path)?;

    let mut count: u64 = 0;
    for result in csv_reader.records() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).map(str::trim);
        let non_empty = |value: Option<&str>| {
            value
                .filter(|s| !s.is_empty())
                .map(std::borrow::ToOwned::to_owned)
        };

        incidents.push(RawIncident {
            occurred_at: cell(columns.occurred_at)
                .and_then(|raw| def.fields.occurred_at.parse(raw)),
            latitude: parse_coordinate(cell(columns.lat)),
            longitude: parse_coordinate(cell(columns.lng)),
            area: non_empty(columns.area.and_then(cell)),
            weapon: non_empty(columns.weapon.and_then(cell)),
        });

        count += 1;
        progress.inc(1);
    }

    log::debug!("Parsed {count} rows from {}", path.display());
    Ok(count)
}
