//! Google Gemini API client.
//!
//! No wait-for-model semantics here: an overloaded Gemini answers 503 and
//! the right move is to fail fast and let the chain advance. The awkward
//! part of the contract is authentication — a bad key comes back as HTTP
//! 400 with an explanatory message, not 401, so the status mapping inspects
//! the error body before classifying.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use super::config::ProviderConfig;
use super::limiter::RateLimiter;
use super::traits::InferenceProvider;
use crate::registry::{ModelSpec, RequestInput};
use crate::telemetry;
use crate::types::NormalizedResult;
use crate::{HuginnError, Result};

/// Client for the Google Gemini API.
pub struct GeminiClient {
    api_key: String,
    http: Client,
    config: ProviderConfig,
    limiter: RateLimiter,
    auth_failed: AtomicBool,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GeminiClient {
    /// Create a client with the default provider configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, ProviderConfig::gemini())
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_config(api_key, ProviderConfig::gemini().base_url(base_url))
    }

    /// Create a client from an explicit configuration.
    pub fn with_config(api_key: impl Into<String>, config: ProviderConfig) -> Self {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        let limiter = RateLimiter::new(config.name, config.min_interval);
        Self {
            api_key: api_key.into(),
            http,
            config,
            limiter,
            auth_failed: AtomicBool::new(false),
        }
    }

    /// Latch the provider off after a rejected key.
    fn disable(&self) {
        if !self.auth_failed.swap(true, Ordering::Relaxed) {
            metrics::counter!(telemetry::PROVIDER_DISABLED_TOTAL,
                "provider" => self.config.name)
            .increment(1);
            warn!(
                provider = self.config.name,
                "API key rejected, disabling provider for this session"
            );
        }
    }

    async fn dispatch(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| HuginnError::Http(e.to_string()))?;
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| HuginnError::Http(e.to_string()));
        }

        match status.as_u16() {
            401 | 403 => {
                self.disable();
                Err(HuginnError::AuthenticationFailed)
            }
            400 => {
                // Gemini reports an invalid key as 400 INVALID_ARGUMENT.
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&text)
                    .map(|b| b.error.message)
                    .unwrap_or(text);
                if message.contains("API key") {
                    self.disable();
                    Err(HuginnError::AuthenticationFailed)
                } else {
                    Err(HuginnError::Api {
                        status: 400,
                        message,
                    })
                }
            }
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(HuginnError::RateLimited { retry_after })
            }
            code => Err(HuginnError::Api {
                status: code,
                message: format!("Gemini API error: {status}"),
            }),
        }
    }
}

#[async_trait]
impl InferenceProvider for GeminiClient {
    fn name(&self) -> &str {
        self.config.name
    }

    fn is_disabled(&self) -> bool {
        self.auth_failed.load(Ordering::Relaxed)
    }

    async fn invoke(
        &self,
        spec: &ModelSpec,
        input: &RequestInput<'_>,
    ) -> Result<NormalizedResult> {
        if self.is_disabled() {
            return Err(HuginnError::AuthenticationFailed);
        }

        self.limiter.await_slot().await;

        let url = format!("{}{}", self.config.base_url, spec.path);
        let body = (spec.build_request)(input);
        let raw = self.dispatch(&url, &body).await?;

        let mut result = (spec.parse_response)(raw)?;
        result.model = Some(spec.id.to_string());
        Ok(result)
    }
}
