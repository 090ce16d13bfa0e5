//! Static per-provider configuration.

use std::time::Duration;

/// Configuration for one provider, created once at startup and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider name, used in registry lookups, logs and metric labels.
    pub name: &'static str,
    /// API base URL. Overridable for tests against a mock server.
    pub base_url: String,
    /// Minimum interval between dispatched calls to this provider.
    pub min_interval: Duration,
    /// Whether the provider honours a wait-for-model directive on cold
    /// starts (HuggingFace's `x-wait-for-model` header).
    pub supports_wait_for_model: bool,
    /// Timeout applied to every outbound HTTP call.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// HuggingFace serverless Inference API defaults.
    pub fn huggingface() -> Self {
        Self {
            name: "huggingface",
            base_url: "https://api-inference.huggingface.co".to_string(),
            min_interval: Duration::from_secs(1),
            supports_wait_for_model: true,
            timeout: Duration::from_secs(30),
        }
    }

    /// Google Gemini API defaults. The free tier allows 15 requests per
    /// minute, hence the wider interval.
    pub fn gemini() -> Self {
        Self {
            name: "gemini",
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            min_interval: Duration::from_secs(4),
            supports_wait_for_model: false,
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the base URL (for testing with wiremock).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the minimum dispatch interval.
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Override the per-call HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
