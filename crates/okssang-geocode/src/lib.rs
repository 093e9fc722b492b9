mod coords;
pub mod diagnostics;
pub mod error;
pub mod kakao;
pub mod offline;
pub mod provider;
pub mod service;
pub mod transport;
mod types;
pub mod vworld;

pub use diagnostics::ResponseDiagnostics;
pub use error::{FailureKind, GeocodeError, ServiceError, TransportError};
pub use kakao::KakaoProvider;
pub use offline::OfflineProvider;
pub use provider::GeocodingProvider;
pub use service::GeocodingService;
pub use transport::{HttpTransport, RetryPolicy, TransportRequest, TransportResponse};
pub use vworld::{VworldConfig, VworldProvider};
