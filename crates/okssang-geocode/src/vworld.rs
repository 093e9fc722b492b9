//! Geocoding against the VWorld address API.
//!
//! VWorld binds API keys to a registered domain, but enforcement differs
//! between deployments: the same key may be rejected with the `domain`
//! parameter in one environment and without it in another. Each call
//! therefore walks a small matrix of request variants, first with the
//! domain identity and then without it, and returns the first usable answer.

use std::time::Duration;

use okssang_core::{LocationResult, Point, ProviderKind};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{Method, Url};
use serde_json::{json, Value};

use crate::coords::point_from_xy;
use crate::diagnostics::ResponseDiagnostics;
use crate::error::{GeocodeError, TransportError};
use crate::transport::{HttpTransport, TransportRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.vworld.kr/req/address";
const PROVIDER: &str = "vworld";

/// Settings for [`VworldProvider`].
#[derive(Clone)]
pub struct VworldConfig {
    pub api_key: String,
    /// Registered domain, bare (`okssang.example.com`) or as a URL.
    pub domain: Option<String>,
    /// Retry without the domain after a failed with-domain attempt.
    pub retry_without_domain: bool,
    pub timeout: Duration,
    /// Also send `version=2.0`, `refine=true`, `simple=false`.
    pub extended_params: bool,
    pub base_url: String,
}

impl VworldConfig {
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            domain: None,
            retry_without_domain: true,
            timeout: Duration::from_secs(5),
            extended_params: false,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl std::fmt::Debug for VworldConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VworldConfig")
            .field("api_key", &"[redacted]")
            .field("domain", &self.domain)
            .field("retry_without_domain", &self.retry_without_domain)
            .field("timeout", &self.timeout)
            .field("extended_params", &self.extended_params)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// The `domain` parameter value and the matching `Referer` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DomainIdentity {
    pub(crate) domain: String,
    pub(crate) referer: String,
}

/// Accepts `https://host:port/path` or a bare host. Returns `None` when
/// nothing usable remains.
pub(crate) fn normalize_domain(raw: &str) -> Option<DomainIdentity> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains("://") {
        let url = Url::parse(raw).ok()?;
        let host = url.host_str()?;
        let domain = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };
        let referer = format!("{}://{domain}/", url.scheme());
        return Some(DomainIdentity { domain, referer });
    }
    let domain = raw.trim_end_matches('/');
    if domain.is_empty() {
        return None;
    }
    Some(DomainIdentity {
        domain: domain.to_owned(),
        referer: format!("https://{domain}/"),
    })
}

/// One combination of request parameters and headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestVariant {
    pub(crate) include_domain: bool,
}

impl RequestVariant {
    const WITH_DOMAIN: Self = Self {
        include_domain: true,
    };
    const WITHOUT_DOMAIN: Self = Self {
        include_domain: false,
    };

    pub(crate) fn label(self) -> &'static str {
        if self.include_domain {
            "with_domain"
        } else {
            "without_domain"
        }
    }
}

/// Coordinates and refined text pulled from an `"OK"` response.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedHit {
    pub(crate) point: Point,
    pub(crate) refined: Option<String>,
    pub(crate) raw: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParsedResponse {
    Hit(ParsedHit),
    /// Well-formed JSON whose `response.status` is not `"OK"`.
    NotOk {
        status: String,
        detail: Option<String>,
    },
}

/// Result of a single variant.
#[derive(Debug)]
enum AttemptOutcome {
    Resolved(ParsedHit),
    /// Application-level rejection. Falls through to the next variant; on
    /// the last variant it means "not found".
    Rejected {
        status: String,
        diagnostics: ResponseDiagnostics,
    },
    /// Transport, HTTP status, or parse failure. Falls through to the next
    /// variant; on the last variant it is surfaced.
    Failed(GeocodeError),
}

/// Interprets a VWorld JSON body.
///
/// # Errors
///
/// Returns a description of the problem when the `response.status`
/// envelope is absent, or when the status is `"OK"` but the coordinates are
/// missing or unusable.
pub(crate) fn parse_response(data: Value) -> Result<ParsedResponse, String> {
    let resp = data.get("response");
    let status = resp
        .and_then(|r| r.get("status"))
        .and_then(Value::as_str)
        .ok_or_else(|| "missing response.status".to_owned())?;
    if status != "OK" {
        let detail = resp
            .and_then(|r| r.get("error"))
            .and_then(|e| e.get("text"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        return Ok(ParsedResponse::NotOk {
            status: status.to_owned(),
            detail,
        });
    }

    let point_obj = resp
        .and_then(|r| r.get("result"))
        .and_then(|r| r.get("point"));
    let point = point_from_xy(
        point_obj.and_then(|p| p.get("x")),
        point_obj.and_then(|p| p.get("y")),
    )?;
    let refined = resp
        .and_then(|r| r.get("refined"))
        .and_then(|r| r.get("text"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    Ok(ParsedResponse::Hit(ParsedHit {
        point,
        refined,
        raw: data,
    }))
}

/// Address-to-point lookups against VWorld.
#[derive(Clone)]
pub struct VworldProvider {
    transport: HttpTransport,
    api_key: String,
    domain: Option<DomainIdentity>,
    retry_without_domain: bool,
    timeout: Duration,
    extended_params: bool,
    base_url: Url,
}

impl std::fmt::Debug for VworldProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VworldProvider")
            .field("domain", &self.domain)
            .field("retry_without_domain", &self.retry_without_domain)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl VworldProvider {
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if `config.base_url` does not parse.
    pub fn new(config: VworldConfig, transport: HttpTransport) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| TransportError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let domain = config.domain.as_deref().and_then(normalize_domain);
        if config.domain.is_some() && domain.is_none() {
            tracing::warn!(
                raw = ?config.domain,
                "VWorld domain could not be normalized; requests will omit it"
            );
        }

        Ok(Self {
            transport,
            api_key: config.api_key,
            domain,
            retry_without_domain: config.retry_without_domain,
            timeout: config.timeout,
            extended_params: config.extended_params,
            base_url,
        })
    }

    /// Variants to try, in order.
    pub(crate) fn variants(&self) -> Vec<RequestVariant> {
        match (&self.domain, self.retry_without_domain) {
            (None, _) => vec![RequestVariant::WITHOUT_DOMAIN],
            (Some(_), false) => vec![RequestVariant::WITH_DOMAIN],
            (Some(_), true) => vec![RequestVariant::WITH_DOMAIN, RequestVariant::WITHOUT_DOMAIN],
        }
    }

    pub(crate) fn build_params(
        &self,
        address: &str,
        variant: RequestVariant,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("service", "address".to_owned()),
            ("request", "getcoord".to_owned()),
            ("format", "json".to_owned()),
            ("crs", "EPSG:4326".to_owned()),
            ("type", "ROAD".to_owned()),
            ("address", address.to_owned()),
            ("key", self.api_key.clone()),
        ];
        if self.extended_params {
            params.push(("version", "2.0".to_owned()));
            params.push(("refine", "true".to_owned()));
            params.push(("simple", "false".to_owned()));
        }
        if let (true, Some(identity)) = (variant.include_domain, &self.domain) {
            params.push(("domain", identity.domain.clone()));
        }
        params
    }

    pub(crate) fn build_headers(&self, variant: RequestVariant) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let (true, Some(identity)) = (variant.include_domain, &self.domain) {
            match HeaderValue::from_str(&identity.referer) {
                Ok(value) => {
                    headers.insert(REFERER, value);
                }
                Err(e) => tracing::debug!(
                    referer = %identity.referer,
                    error = %e,
                    "referer is not a valid header value; sending domain parameter only"
                ),
            }
        }
        headers
    }

    async fn attempt(&self, address: &str, variant: RequestVariant) -> AttemptOutcome {
        let params = self.build_params(address, variant);
        let query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let request = TransportRequest {
            method: Method::GET,
            url: &self.base_url,
            query: &query,
            headers: self.build_headers(variant),
            timeout: self.timeout,
        };
        tracing::debug!(variant = variant.label(), "requesting VWorld coordinates");

        let response = match self.transport.execute(&request).await {
            Ok(response) => response,
            Err(err) => return AttemptOutcome::Failed(GeocodeError::Network(err)),
        };
        if !response.status.is_success() {
            return AttemptOutcome::Failed(GeocodeError::UpstreamStatus {
                status: response.status.as_u16(),
                diagnostics: Box::new(response.diagnostics()),
            });
        }
        let data = match response.json() {
            Ok(data) => data,
            Err(e) => {
                return AttemptOutcome::Failed(GeocodeError::MalformedResponse {
                    reason: format!("body is not valid JSON: {e}"),
                    diagnostics: Box::new(response.diagnostics()),
                });
            }
        };

        match parse_response(data) {
            Ok(ParsedResponse::Hit(hit)) => AttemptOutcome::Resolved(hit),
            Ok(ParsedResponse::NotOk { status, detail }) => {
                tracing::debug!(
                    variant = variant.label(),
                    status = %status,
                    detail = ?detail,
                    "VWorld rejected request"
                );
                AttemptOutcome::Rejected {
                    status,
                    diagnostics: response.diagnostics(),
                }
            }
            Err(reason) => AttemptOutcome::Failed(GeocodeError::MalformedResponse {
                reason,
                diagnostics: Box::new(response.diagnostics()),
            }),
        }
    }

    /// Resolves `address` to a point.
    ///
    /// Returns `Ok(None)` for blank input (no request is made) and when the
    /// last variant is rejected by VWorld with a non-`"OK"` status.
    ///
    /// # Errors
    ///
    /// Returns the last variant's [`GeocodeError`] when it failed at the
    /// transport, HTTP status, or parse level. When more than one variant
    /// ran, it is wrapped in [`GeocodeError::VariantsExhausted`].
    pub async fn geocode(&self, address: &str) -> Result<Option<LocationResult>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }

        let variants = self.variants();
        let total = variants.len();
        let mut earlier: Vec<Value> = Vec::new();
        let mut last_failure: Option<GeocodeError> = None;

        for variant in variants {
            match self.attempt(address, variant).await {
                AttemptOutcome::Resolved(hit) => {
                    let extra = json!({
                        "raw": hit.raw,
                        "variant": variant.label(),
                        "fallback_diagnostics": earlier,
                    });
                    let result = LocationResult::new(
                        address,
                        hit.refined.as_deref(),
                        hit.point,
                        ProviderKind::Vworld,
                        extra,
                    )?;
                    return Ok(Some(result));
                }
                AttemptOutcome::Rejected {
                    status,
                    diagnostics,
                } => {
                    diagnostics.log(PROVIDER, variant.label(), "VWorld returned a non-OK status");
                    earlier.push(json!({
                        "variant": variant.label(),
                        "status": status,
                        "diagnostics": diagnostics,
                    }));
                    last_failure = None;
                }
                AttemptOutcome::Failed(err) => {
                    match err.diagnostics() {
                        Some(d) => d.log(PROVIDER, variant.label(), "VWorld request variant failed"),
                        None => tracing::warn!(
                            provider = PROVIDER,
                            variant = variant.label(),
                            error = %err,
                            "VWorld request variant failed"
                        ),
                    }
                    earlier.push(json!({
                        "variant": variant.label(),
                        "error": err.to_string(),
                        "diagnostics": err.diagnostics(),
                    }));
                    last_failure = Some(err);
                }
            }
        }

        match last_failure {
            Some(err) if total > 1 => Err(GeocodeError::VariantsExhausted {
                variants: total,
                last: Box::new(err),
            }),
            Some(err) => Err(err),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "vworld_test.rs"]
mod tests;
