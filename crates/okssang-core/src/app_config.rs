/// Process-wide settings, built once at startup and passed into providers.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub kakao_rest_api_key: Option<String>,
    pub vworld_api_key: Option<String>,
    pub vworld_domain: Option<String>,
    pub vworld_domain_fallback: bool,
    pub geocode_timeout_secs: u64,
    pub http_max_attempts: u32,
    pub http_backoff_ms: u64,
    pub http_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field(
                "kakao_rest_api_key",
                &self.kakao_rest_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "vworld_api_key",
                &self.vworld_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("vworld_domain", &self.vworld_domain)
            .field("vworld_domain_fallback", &self.vworld_domain_fallback)
            .field("geocode_timeout_secs", &self.geocode_timeout_secs)
            .field("http_max_attempts", &self.http_max_attempts)
            .field("http_backoff_ms", &self.http_backoff_ms)
            .field("http_user_agent", &self.http_user_agent)
            .finish()
    }
}
