//! Compact response summaries for operator troubleshooting.

use serde::Serialize;

/// Maximum number of characters of the response body kept in a preview.
pub const BODY_PREVIEW_CHARS: usize = 300;

/// What an operator needs to see when an upstream call misbehaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseDiagnostics {
    pub status: Option<u16>,
    /// Resolved request URL with the API key masked.
    pub url: String,
    pub content_type: Option<String>,
    pub body_preview: String,
}

impl ResponseDiagnostics {
    #[must_use]
    pub fn new(status: u16, url: &reqwest::Url, content_type: Option<&str>, body: &str) -> Self {
        Self {
            status: Some(status),
            url: redact_url(url),
            content_type: content_type.map(str::to_owned),
            body_preview: preview(body),
        }
    }

    /// Emits the diagnostics as structured log fields.
    pub fn log(&self, provider: &str, variant: &str, message: &str) {
        tracing::warn!(
            provider,
            variant,
            status = ?self.status,
            url = %self.url,
            content_type = ?self.content_type,
            body_preview = %self.body_preview,
            "{message}"
        );
    }
}

/// Collapses whitespace and truncates to [`BODY_PREVIEW_CHARS`] characters.
#[must_use]
pub fn preview(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= BODY_PREVIEW_CHARS {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(BODY_PREVIEW_CHARS).collect();
    truncated.push('…');
    truncated
}

/// Replaces the value of the `key` query parameter so logs never carry
/// credentials.
#[must_use]
pub fn redact_url(url: &reqwest::Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "key") {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
