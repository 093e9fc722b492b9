//! Wire types for the Kakao local search API.

use serde::Deserialize;

/// Envelope of `GET /v2/local/search/address.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct KakaoAddressResponse {
    #[serde(default)]
    pub documents: Vec<KakaoDocument>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KakaoDocument {
    #[serde(default)]
    pub address_name: Option<String>,
    /// Longitude, usually as a string.
    #[serde(default)]
    pub x: Option<serde_json::Value>,
    /// Latitude, usually as a string.
    #[serde(default)]
    pub y: Option<serde_json::Value>,
    #[serde(default)]
    pub road_address: Option<KakaoRoadAddress>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KakaoRoadAddress {
    #[serde(default)]
    pub address_name: Option<String>,
}
