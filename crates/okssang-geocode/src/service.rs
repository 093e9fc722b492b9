//! Caller-facing geocoding entry point.

use okssang_core::{AppConfig, LocationResult, ProviderKind};

use crate::error::{ServiceError, TransportError};
use crate::provider::GeocodingProvider;

/// Wraps the selected provider and folds every lookup failure into
/// [`ServiceError::LookupUnavailable`]. A `None` ("not found") answer is
/// passed through untouched.
#[derive(Debug, Clone)]
pub struct GeocodingService {
    provider: GeocodingProvider,
}

impl GeocodingService {
    #[must_use]
    pub fn new(provider: impl Into<GeocodingProvider>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    /// Selects a provider from `config` once, at construction.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the selected provider cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, TransportError> {
        Ok(Self::new(GeocodingProvider::from_config(config)?))
    }

    #[must_use]
    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// Resolves `address`.
    ///
    /// `Ok(None)` means the address is blank or could not be resolved; ask
    /// the user to re-enter it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::LookupUnavailable`] when the provider failed;
    /// the cause is logged and kept as the error source.
    pub async fn geocode(&self, address: &str) -> Result<Option<LocationResult>, ServiceError> {
        self.provider.geocode(address).await.map_err(|err| {
            tracing::warn!(
                provider = %self.provider.kind(),
                kind = ?err.kind(),
                error = %err,
                "geocoding lookup failed"
            );
            ServiceError::LookupUnavailable(err)
        })
    }
}
