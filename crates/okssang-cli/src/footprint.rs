//! `footprint-area` command handler.

use std::path::Path;
use std::process::ExitCode;

use okssang_core::geometry::polygon_area_m2;

/// Parse a JSON array of `[lon, lat]` pairs.
///
/// # Errors
///
/// Returns an error if `json` is not an array of two-number arrays.
pub(crate) fn parse_footprint(json: &str) -> anyhow::Result<Vec<(f64, f64)>> {
    let pairs: Vec<[f64; 2]> = serde_json::from_str(json)
        .map_err(|e| anyhow::anyhow!("footprint must be a JSON array of [lon, lat] pairs: {e}"))?;
    Ok(pairs.into_iter().map(|[lon, lat]| (lon, lat)).collect())
}

/// Read a footprint polygon from `path` and print its area in m².
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub(crate) fn run_footprint_area(path: &Path) -> anyhow::Result<ExitCode> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let coords = parse_footprint(&json)?;
    if coords.len() < 3 {
        tracing::warn!(points = coords.len(), "footprint has fewer than 3 points");
    }

    let area = polygon_area_m2(coords);
    println!("{area:.2} m²");
    Ok(ExitCode::SUCCESS)
}
