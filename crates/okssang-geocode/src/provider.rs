//! Provider selection by configured credentials.

use std::time::Duration;

use okssang_core::{AppConfig, LocationResult, ProviderKind};

use crate::error::{GeocodeError, TransportError};
use crate::kakao::{KakaoProvider, KAKAO_BASE_URL};
use crate::offline::OfflineProvider;
use crate::transport::{HttpTransport, RetryPolicy};
use crate::vworld::{VworldConfig, VworldProvider, DEFAULT_BASE_URL};

/// One configured geocoding backend.
#[derive(Debug, Clone)]
pub enum GeocodingProvider {
    Kakao(KakaoProvider),
    Vworld(VworldProvider),
    Offline(OfflineProvider),
}

impl From<KakaoProvider> for GeocodingProvider {
    fn from(p: KakaoProvider) -> Self {
        Self::Kakao(p)
    }
}

impl From<VworldProvider> for GeocodingProvider {
    fn from(p: VworldProvider) -> Self {
        Self::Vworld(p)
    }
}

impl From<OfflineProvider> for GeocodingProvider {
    fn from(p: OfflineProvider) -> Self {
        Self::Offline(p)
    }
}

impl GeocodingProvider {
    /// Picks Kakao if its key is set, else VWorld if its key is set, else
    /// the offline provider.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client or a provider cannot be
    /// constructed from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(config.geocode_timeout_secs);
        let transport = || {
            HttpTransport::new(
                &config.http_user_agent,
                RetryPolicy::with_attempts(config.http_max_attempts, config.http_backoff_ms),
            )
        };

        let provider: Self = if let Some(key) = &config.kakao_rest_api_key {
            KakaoProvider::new(key, timeout, KAKAO_BASE_URL, transport()?)?.into()
        } else if let Some(key) = &config.vworld_api_key {
            let vworld = VworldConfig {
                api_key: key.clone(),
                domain: config.vworld_domain.clone(),
                retry_without_domain: config.vworld_domain_fallback,
                timeout,
                extended_params: false,
                base_url: DEFAULT_BASE_URL.to_owned(),
            };
            VworldProvider::new(vworld, transport()?)?.into()
        } else {
            OfflineProvider.into()
        };

        tracing::info!(provider = %provider.kind(), "geocoding provider selected");
        Ok(provider)
    }

    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            GeocodingProvider::Kakao(_) => ProviderKind::Kakao,
            GeocodingProvider::Vworld(_) => ProviderKind::Vworld,
            GeocodingProvider::Offline(_) => ProviderKind::Offline,
        }
    }

    /// Forwards to the selected provider.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`GeocodeError`].
    pub async fn geocode(&self, address: &str) -> Result<Option<LocationResult>, GeocodeError> {
        match self {
            GeocodingProvider::Kakao(p) => p.geocode(address).await,
            GeocodingProvider::Vworld(p) => p.geocode(address).await,
            GeocodingProvider::Offline(p) => p.geocode(address),
        }
    }
}
