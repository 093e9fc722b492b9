//! Coercion of loosely typed upstream coordinates.

use okssang_core::Point;
use serde_json::Value;

/// Reads a coordinate that upstreams send either as a JSON number or as a
/// numeric string.
pub(crate) fn coerce(value: Option<&Value>, field: &str) -> Result<f64, String> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Null) | None => return Err(format!("missing coordinate field '{field}'")),
        Some(other) => return Err(format!("coordinate field '{field}' has unexpected type: {other}")),
    };
    parsed.ok_or_else(|| format!("coordinate field '{field}' is not a number: {value:?}"))
}

/// Builds a [`Point`] from upstream `x` (longitude) and `y` (latitude).
pub(crate) fn point_from_xy(x: Option<&Value>, y: Option<&Value>) -> Result<Point, String> {
    let lon = coerce(x, "x")?;
    let lat = coerce(y, "y")?;
    Point::new(lat, lon).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_numeric_strings() {
        let v = json!(" 126.9780 ");
        assert!((coerce(Some(&v), "x").unwrap() - 126.978).abs() < 1e-12);
    }

    #[test]
    fn accepts_numbers() {
        let v = json!(37.5665);
        assert!((coerce(Some(&v), "y").unwrap() - 37.5665).abs() < 1e-12);
    }

    #[test]
    fn rejects_missing_field() {
        let err = coerce(None, "x").unwrap_err();
        assert!(err.contains("missing"), "got: {err}");
    }

    #[test]
    fn rejects_garbage_string() {
        let v = json!("abc");
        assert!(coerce(Some(&v), "x").is_err());
    }

    #[test]
    fn rejects_non_finite_strings() {
        let x = json!("NaN");
        let y = json!("37.5");
        assert!(point_from_xy(Some(&x), Some(&y)).is_err());
    }

    #[test]
    fn swaps_x_y_into_lat_lon() {
        let x = json!("126.9780");
        let y = json!("37.5665");
        let p = point_from_xy(Some(&x), Some(&y)).unwrap();
        assert!((p.lat() - 37.5665).abs() < 1e-12);
        assert!((p.lon() - 126.9780).abs() < 1e-12);
    }
}
