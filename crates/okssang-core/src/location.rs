//! Geocoding result types shared by providers and their callers.

use serde::Serialize;

use crate::CoreError;

/// A WGS84 coordinate. Both components are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    lat: f64,
    lon: f64,
}

impl Point {
    /// # Errors
    ///
    /// Returns [`CoreError::NonFiniteCoordinate`] if either component is NaN
    /// or infinite.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        if !lat.is_finite() {
            return Err(CoreError::NonFiniteCoordinate {
                axis: "lat",
                value: lat,
            });
        }
        if !lon.is_finite() {
            return Err(CoreError::NonFiniteCoordinate {
                axis: "lon",
                value: lon,
            });
        }
        Ok(Self { lat, lon })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Which backend produced a [`LocationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Kakao,
    Vworld,
    /// Fixed reference point used when no external API is configured.
    Offline,
}

impl ProviderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Kakao => "kakao",
            ProviderKind::Vworld => "vworld",
            ProviderKind::Offline => "offline",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved address. Immutable once constructed.
///
/// `extra` carries free-form diagnostics (raw upstream payload, notes) and is
/// not meant to drive caller logic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationResult {
    input_address: String,
    normalized_address: String,
    point: Point,
    provider: ProviderKind,
    extra: serde_json::Value,
}

impl LocationResult {
    /// Builds a result from a caller-supplied address and the upstream answer.
    ///
    /// `input_address` is trimmed. A missing or blank `normalized_address`
    /// falls back to the trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyAddress`] if `input_address` is blank.
    pub fn new(
        input_address: &str,
        normalized_address: Option<&str>,
        point: Point,
        provider: ProviderKind,
        extra: serde_json::Value,
    ) -> Result<Self, CoreError> {
        let input_address = input_address.trim();
        if input_address.is_empty() {
            return Err(CoreError::EmptyAddress);
        }
        let normalized_address = normalized_address
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(input_address);

        Ok(Self {
            input_address: input_address.to_owned(),
            normalized_address: normalized_address.to_owned(),
            point,
            provider,
            extra,
        })
    }

    #[must_use]
    pub fn input_address(&self) -> &str {
        &self.input_address
    }

    #[must_use]
    pub fn normalized_address(&self) -> &str {
        &self.normalized_address
    }

    #[must_use]
    pub fn point(&self) -> Point {
        self.point
    }

    #[must_use]
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    #[must_use]
    pub fn extra(&self) -> &serde_json::Value {
        &self.extra
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.provider == ProviderKind::Offline
    }
}
