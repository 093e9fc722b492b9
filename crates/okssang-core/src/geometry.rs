//! Rooftop footprint geometry.
//!
//! Small-area approximations only: a local equirectangular projection is
//! accurate enough for single-building polygons.

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Share of points that must fall inside the Korean bounding box before an
/// axis order is accepted.
const KOREA_MATCH_RATIO: f64 = 0.6;

/// Great-circle distance in metres.
#[must_use]
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

fn in_korea(lat: f64, lon: f64) -> bool {
    (33.0..=39.5).contains(&lat) && (124.0..=132.5).contains(&lon)
}

#[allow(clippy::cast_precision_loss)]
fn mostly_in_korea<F>(points: &[(f64, f64)], to_lat_lon: F) -> bool
where
    F: Fn(&(f64, f64)) -> (f64, f64),
{
    if points.is_empty() {
        return false;
    }
    let valid = points
        .iter()
        .map(to_lat_lon)
        .filter(|&(lat, lon)| in_korea(lat, lon))
        .count();
    valid as f64 / points.len() as f64 >= KOREA_MATCH_RATIO
}

/// Footprint providers disagree on axis order. Keeps `(lon, lat)` input as
/// is, swaps input that only makes sense as `(lat, lon)`, and leaves
/// anything outside Korea untouched.
fn normalize_lon_lat(points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if mostly_in_korea(&points, |&(lon, lat)| (lat, lon)) {
        return points;
    }
    if mostly_in_korea(&points, |&(lat, lon)| (lat, lon)) {
        return points.into_iter().map(|(lat, lon)| (lon, lat)).collect();
    }
    points
}

/// Approximate polygon area in square metres from `(lon, lat)` vertices.
///
/// The ring may be open or closed. Fewer than three vertices yield `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn polygon_area_m2<I>(coords_lon_lat: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let points: Vec<(f64, f64)> = coords_lon_lat.into_iter().collect();
    if points.len() < 3 {
        return 0.0;
    }
    let points = normalize_lon_lat(points);

    let n = points.len() as f64;
    let lon_mean = points.iter().map(|&(lon, _)| lon).sum::<f64>() / n;
    let lat_mean = points.iter().map(|&(_, lat)| lat).sum::<f64>() / n;
    let phi = lat_mean.to_radians();
    let m_per_deg_lat = 111_132.92 - 559.82 * (2.0 * phi).cos() + 1.175 * (4.0 * phi).cos();
    let m_per_deg_lon = 111_412.84 * phi.cos() - 93.5 * (3.0 * phi).cos();

    // Offsets from the mean keep the shoelace products small.
    let projected: Vec<(f64, f64)> = points
        .iter()
        .map(|&(lon, lat)| {
            (
                (lon - lon_mean) * m_per_deg_lon,
                (lat - lat_mean) * m_per_deg_lat,
            )
        })
        .collect();

    let twice_area: f64 = projected
        .iter()
        .zip(projected.iter().cycle().skip(1))
        .map(|(&(x1, y1), &(x2, y2))| x1 * y2 - x2 * y1)
        .sum();

    twice_area.abs() / 2.0
}
