//! Leaflet heatmap page rendering and export.

use std::path::{Path, PathBuf};

use proximity_map_analytics::grouping::{median_coordinate, top_areas};
use proximity_map_incident_models::{CleanIncident, Coordinate};
use serde::Serialize;

use crate::GenerateError;

/// Page skeleton with `__TOKEN__` placeholders substituted at render time.
/// Kept as plain replacement tokens rather than a format string so the
/// embedded CSS/JS braces stay readable.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
<style>
html, body, #map { height: 100%; margin: 0; }
.area-label {
  white-space: nowrap;
  font: 12px/1.2 sans-serif;
  color: #000;
  background: rgba(255, 255, 255, 0.8);
  padding: 1px 3px;
}
</style>
</head>
<body>
<div id="map"></div>
<script>
const map = L.map("map").setView([__CENTER_LAT__, __CENTER_LNG__], __ZOOM__);
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);

const boundary = __BOUNDARY__;
if (boundary !== null) {
  L.geoJSON(boundary, { style: { color: "#555", weight: 1, fill: false } }).addTo(map);
}

const points = __POINTS__;
if (points.length > 0) {
  L.heatLayer(points, { radius: 10, blur: 15 }).addTo(map);
}

const labels = __LABELS__;
for (const label of labels) {
  L.marker([label.latitude, label.longitude], {
    icon: L.divIcon({ className: "area-label", html: label.name })
  }).addTo(map);
}
</script>
</body>
</html>
"#;

/// Configuration for one heatmap export.
#[derive(Debug, Clone)]
pub struct HeatmapOptions {
    /// Page title (e.g., `"Crime Heatmap for Los Angeles (2020-2024)"`).
    pub title: String,
    /// Initial map center.
    pub center: Coordinate,
    /// Initial zoom level.
    pub zoom: u8,
    /// Where to write the HTML file.
    pub output_path: PathBuf,
    /// Optional boundary `GeoJSON` file to overlay.
    pub boundary_path: Option<PathBuf>,
    /// Annotate this many top areas at their median coordinates.
    pub annotate_top: Option<usize>,
}

/// A label annotation embedded into the page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AreaLabel {
    name: String,
    latitude: f64,
    longitude: f64,
}

/// Renders the heatmap and writes it to the configured output path.
///
/// An empty incident collection still produces a valid page (the heat
/// layer is simply skipped). Uses an atomic write pattern (write to
/// `.tmp`, then rename) to avoid truncated artifacts from interrupted
/// runs.
///
/// # Errors
///
/// Returns [`GenerateError`] if the boundary file is missing or invalid,
/// or the output path cannot be written.
pub fn write_heatmap(
    options: &HeatmapOptions,
    incidents: &[CleanIncident],
) -> Result<PathBuf, GenerateError> {
    let boundary_json = match &options.boundary_path {
        Some(path) => load_boundary(path)?,
        None => "null".to_owned(),
    };

    let html = render_page(options, incidents, &boundary_json)?;

    if let Some(parent) = options.output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = options.output_path.with_extension("html.tmp");
    std::fs::write(&tmp_path, html)?;
    std::fs::rename(&tmp_path, &options.output_path)?;

    log::info!(
        "Heatmap with {} points written to {}",
        incidents.len(),
        options.output_path.display()
    );
    Ok(options.output_path.clone())
}

/// Renders the page HTML without touching the filesystem.
///
/// # Errors
///
/// Returns [`GenerateError::Json`] if embedded data fails to serialize.
pub fn render_page(
    options: &HeatmapOptions,
    incidents: &[CleanIncident],
    boundary_json: &str,
) -> Result<String, GenerateError> {
    let points: Vec<[f64; 2]> = incidents
        .iter()
        .map(|incident| [incident.latitude, incident.longitude])
        .collect();

    let labels = options
        .annotate_top
        .map_or_else(Vec::new, |n| area_labels(incidents, n));

    Ok(PAGE_TEMPLATE
        .replace("__TITLE__", &escape_html(&options.title))
        .replace("__CENTER_LAT__", &options.center.latitude.to_string())
        .replace("__CENTER_LNG__", &options.center.longitude.to_string())
        .replace("__ZOOM__", &options.zoom.to_string())
        .replace("__BOUNDARY__", boundary_json)
        .replace("__POINTS__", &serde_json::to_string(&points)?)
        .replace("__LABELS__", &serde_json::to_string(&labels)?))
}

/// Builds label annotations for the `n` most frequent areas, anchored at
/// each area's median coordinate.
fn area_labels(incidents: &[CleanIncident], n: usize) -> Vec<AreaLabel> {
    let (groups, records) = top_areas(incidents, n);

    groups
        .into_iter()
        .filter_map(|group| {
            let subset = records
                .iter()
                .copied()
                .filter(|incident| incident.area.as_deref() == Some(group.label.as_str()));
            median_coordinate(subset).map(|anchor| AreaLabel {
                name: escape_html(&group.label),
                latitude: anchor.latitude,
                longitude: anchor.longitude,
            })
        })
        .collect()
}

/// Reads and validates a boundary `GeoJSON` file.
///
/// The geometry is never interpreted here; the validated text is embedded
/// verbatim for the map library to draw.
fn load_boundary(path: &Path) -> Result<String, GenerateError> {
    let contents = std::fs::read_to_string(path)?;
    contents
        .parse::<geojson::GeoJson>()
        .map_err(|e| GenerateError::Boundary {
            message: format!("{}: {e}", path.display()),
        })?;
    Ok(contents)
}

/// Minimal HTML escaping for text interpolated into the page.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
