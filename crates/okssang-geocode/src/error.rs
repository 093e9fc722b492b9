use thiserror::Error;

use crate::diagnostics::ResponseDiagnostics;

/// Errors from the HTTP transport layer, after its own retries.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network, TLS, timeout, or DNS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Every attempt returned a transient status (429/5xx).
    #[error("HTTP {status} from {url} persisted after {attempts} attempts")]
    RetriesExhausted {
        status: u16,
        url: String,
        attempts: u32,
        diagnostics: Box<ResponseDiagnostics>,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid {name} header: {reason}")]
    InvalidHeader { name: &'static str, reason: String },
}

/// Coarse classification of a failed geocode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Timeout, connection failure, or transient statuses exhausted.
    Network,
    /// The upstream answered with a non-2xx status that is not retried.
    UpstreamStatus,
    /// The body was not JSON or lacked usable coordinates.
    MalformedResponse,
}

/// Errors returned by a geocoding provider.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    #[error("upstream returned HTTP {status} from {url}", url = .diagnostics.url)]
    UpstreamStatus {
        status: u16,
        diagnostics: Box<ResponseDiagnostics>,
    },

    #[error("malformed response from {url}: {reason}", url = .diagnostics.url)]
    MalformedResponse {
        reason: String,
        diagnostics: Box<ResponseDiagnostics>,
    },

    /// A parsed answer violated a [`okssang_core::LocationResult`] invariant.
    #[error("invalid location result: {0}")]
    InvalidResult(#[from] okssang_core::CoreError),

    /// Every request variant failed; wraps the error from the last one.
    #[error("all {variants} request variants failed, domain fallback exhausted: {last}")]
    VariantsExhausted {
        variants: usize,
        #[source]
        last: Box<GeocodeError>,
    },
}

impl GeocodeError {
    /// Classifies the failure, looking through [`GeocodeError::VariantsExhausted`].
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            GeocodeError::Network(_) => FailureKind::Network,
            GeocodeError::UpstreamStatus { .. } => FailureKind::UpstreamStatus,
            GeocodeError::MalformedResponse { .. } | GeocodeError::InvalidResult(_) => {
                FailureKind::MalformedResponse
            }
            GeocodeError::VariantsExhausted { last, .. } => last.kind(),
        }
    }

    /// Operator-facing response details, when a response was received.
    #[must_use]
    pub fn diagnostics(&self) -> Option<&ResponseDiagnostics> {
        match self {
            GeocodeError::Network(TransportError::RetriesExhausted { diagnostics, .. })
            | GeocodeError::UpstreamStatus { diagnostics, .. }
            | GeocodeError::MalformedResponse { diagnostics, .. } => Some(&**diagnostics),
            GeocodeError::Network(_) | GeocodeError::InvalidResult(_) => None,
            GeocodeError::VariantsExhausted { last, .. } => last.diagnostics(),
        }
    }
}

/// The single user-facing failure of [`crate::GeocodingService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("could not reach the geocoding service, please try again later")]
    LookupUnavailable(#[source] GeocodeError),
}
