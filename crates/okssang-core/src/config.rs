use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars,
/// so API keys can live in a local secrets file instead of the shell.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Empty and whitespace-only values are treated as unset.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let log_level = or_default("OKSSANG_LOG_LEVEL", "info");

    let kakao_rest_api_key = optional("KAKAO_REST_API_KEY");
    let vworld_api_key = optional("VWORLD_API_KEY");
    let vworld_domain = optional("VWORLD_DOMAIN");
    let vworld_domain_fallback = parse_bool("OKSSANG_VWORLD_DOMAIN_FALLBACK", "true")?;

    let geocode_timeout_secs = parse_u64("OKSSANG_GEOCODE_TIMEOUT_SECS", "5")?;
    if geocode_timeout_secs == 0 {
        return Err(invalid(
            "OKSSANG_GEOCODE_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let http_max_attempts = parse_u32("OKSSANG_HTTP_MAX_ATTEMPTS", "3")?;
    if http_max_attempts == 0 {
        return Err(invalid(
            "OKSSANG_HTTP_MAX_ATTEMPTS",
            "attempt budget must be at least 1".to_string(),
        ));
    }
    let http_backoff_ms = parse_u64("OKSSANG_HTTP_BACKOFF_MS", "500")?;
    let http_user_agent = or_default("OKSSANG_HTTP_USER_AGENT", "okssang/0.1 (rooftop-greening)");

    Ok(AppConfig {
        log_level,
        kakao_rest_api_key,
        vworld_api_key,
        vworld_domain,
        vworld_domain_fallback,
        geocode_timeout_secs,
        http_max_attempts,
        http_backoff_ms,
        http_user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
