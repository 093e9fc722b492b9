//! Geocoding against the Kakao local search API.

use std::time::Duration;

use okssang_core::{LocationResult, ProviderKind};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, Url};
use serde_json::json;

use crate::coords::point_from_xy;
use crate::error::{GeocodeError, TransportError};
use crate::transport::{HttpTransport, TransportRequest};
use crate::types::KakaoAddressResponse;

pub const KAKAO_BASE_URL: &str = "https://dapi.kakao.com/v2/local/search/address.json";

/// Address-to-point lookups against Kakao. One request variant per call.
#[derive(Clone)]
pub struct KakaoProvider {
    transport: HttpTransport,
    authorization: HeaderValue,
    timeout: Duration,
    base_url: Url,
}

impl std::fmt::Debug for KakaoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoProvider")
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl KakaoProvider {
    /// # Errors
    ///
    /// - [`TransportError::InvalidUrl`] if `base_url` does not parse.
    /// - [`TransportError::InvalidHeader`] if `api_key` cannot be sent as a header.
    pub fn new(
        api_key: &str,
        timeout: Duration,
        base_url: &str,
        transport: HttpTransport,
    ) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let mut authorization = HeaderValue::from_str(&format!("KakaoAK {}", api_key.trim()))
            .map_err(|e| TransportError::InvalidHeader {
                name: "Authorization",
                reason: e.to_string(),
            })?;
        authorization.set_sensitive(true);

        Ok(Self {
            transport,
            authorization,
            timeout,
            base_url,
        })
    }

    /// Resolves `address` to the first matching document.
    ///
    /// Returns `Ok(None)` for blank input and when Kakao finds no documents.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Network`] on transport failure.
    /// - [`GeocodeError::UpstreamStatus`] on a non-2xx status.
    /// - [`GeocodeError::MalformedResponse`] if the body is not the expected JSON.
    pub async fn geocode(&self, address: &str) -> Result<Option<LocationResult>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        let query = [("query", address)];
        let request = TransportRequest {
            method: Method::GET,
            url: &self.base_url,
            query: &query,
            headers,
            timeout: self.timeout,
        };

        let response = self.transport.execute(&request).await?;
        if !response.status.is_success() {
            let diagnostics = response.diagnostics();
            diagnostics.log("kakao", "default", "Kakao returned a non-success status");
            return Err(GeocodeError::UpstreamStatus {
                status: response.status.as_u16(),
                diagnostics: Box::new(diagnostics),
            });
        }

        let malformed = |reason: String| {
            let diagnostics = response.diagnostics();
            diagnostics.log("kakao", "default", "Kakao response could not be parsed");
            GeocodeError::MalformedResponse {
                reason,
                diagnostics: Box::new(diagnostics),
            }
        };

        let raw = response
            .json()
            .map_err(|e| malformed(format!("body is not valid JSON: {e}")))?;
        let parsed: KakaoAddressResponse = serde_json::from_value(raw.clone())
            .map_err(|e| malformed(format!("unexpected response shape: {e}")))?;

        let Some(doc) = parsed.documents.into_iter().next() else {
            tracing::debug!(address, "Kakao returned no documents");
            return Ok(None);
        };
        let point = point_from_xy(doc.x.as_ref(), doc.y.as_ref()).map_err(malformed)?;
        let normalized = doc
            .road_address
            .and_then(|r| r.address_name)
            .or(doc.address_name);

        let result = LocationResult::new(
            address,
            normalized.as_deref(),
            point,
            ProviderKind::Kakao,
            json!({ "raw": raw }),
        )?;
        Ok(Some(result))
    }
}
