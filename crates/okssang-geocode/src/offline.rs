//! Stand-in provider for environments without any geocoding credentials.

use okssang_core::{LocationResult, Point, ProviderKind};
use serde_json::json;

use crate::error::GeocodeError;

/// Seoul City Hall.
pub const REFERENCE_LAT: f64 = 37.5665;
pub const REFERENCE_LON: f64 = 126.9780;

/// Returns a fixed reference point for any non-blank address. Never performs I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl OfflineProvider {
    /// # Errors
    ///
    /// Only [`GeocodeError::InvalidResult`], which cannot occur for the
    /// built-in reference point.
    pub fn geocode(self, address: &str) -> Result<Option<LocationResult>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }
        let point = Point::new(REFERENCE_LAT, REFERENCE_LON)?;
        let result = LocationResult::new(
            address,
            None,
            point,
            ProviderKind::Offline,
            json!({ "note": "no external geocoding API configured; returning reference coordinates" }),
        )?;
        Ok(Some(result))
    }
}
