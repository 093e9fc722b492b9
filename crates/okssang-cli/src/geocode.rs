//! `geocode` command handler.

use std::process::ExitCode;

use okssang_core::AppConfig;
use okssang_geocode::GeocodingService;

/// Exit status when the address could not be resolved.
pub(crate) const EXIT_NOT_FOUND: u8 = 1;
/// Exit status when the lookup itself failed.
pub(crate) const EXIT_UNAVAILABLE: u8 = 2;

/// Resolve `address` and print the result as pretty JSON.
///
/// Upstream payloads never reach stdout or stderr; they are only logged.
///
/// # Errors
///
/// Returns an error if the provider cannot be built from `config` or the
/// result cannot be serialized.
pub(crate) async fn run_geocode(config: &AppConfig, address: &str) -> anyhow::Result<ExitCode> {
    let service = GeocodingService::from_config(config)?;

    match service.geocode(address).await {
        Ok(Some(result)) => {
            if result.is_offline() {
                eprintln!(
                    "warning: no geocoding API key configured; showing reference coordinates"
                );
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => {
            eprintln!("address not found; please check the road address and re-enter it");
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
        Err(e) => {
            // Display only the top-level message; the cause chain is in the log.
            eprintln!("{e}");
            Ok(ExitCode::from(EXIT_UNAVAILABLE))
        }
    }
}
