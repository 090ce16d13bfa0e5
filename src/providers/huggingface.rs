//! HuggingFace Inference API client.
//!
//! Serverless inference endpoints cold-start their models: a request to an
//! unloaded model answers 503 with an `estimated_time` hint. This client
//! issues exactly one retry with the `x-wait-for-model` directive — bounded,
//! so worst-case latency stays at two HTTP timeouts — and claims a fresh
//! rate-limit slot for the retry.
//!
//! A 401/403 latches the client for the process lifetime: every later call
//! short-circuits to `AuthenticationFailed` without touching the network,
//! so a dead key cannot burn rate-limit budget.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::config::ProviderConfig;
use super::limiter::RateLimiter;
use super::traits::InferenceProvider;
use crate::registry::{ModelSpec, RequestInput};
use crate::telemetry;
use crate::types::NormalizedResult;
use crate::{HuginnError, Result};

/// Client for the HuggingFace serverless Inference API.
pub struct HuggingFaceClient {
    api_key: String,
    http: Client,
    config: ProviderConfig,
    limiter: RateLimiter,
    auth_failed: AtomicBool,
}

/// 503 body shape when a model is cold-starting.
#[derive(Deserialize)]
struct LoadingBody {
    #[allow(dead_code)]
    error: String,
    estimated_time: Option<f64>,
}

impl HuggingFaceClient {
    /// Create a client with the default provider configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, ProviderConfig::huggingface())
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_config(api_key, ProviderConfig::huggingface().base_url(base_url))
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

    /// Issue one HTTP call and map the status onto the error taxonomy.
    async fn dispatch(
        &self,
        url: &str,
        body: &serde_json::Value,
        wait_for_model: bool,
    ) -> Result<serde_json::Value> {
        let mut request = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("x-use-cache", "true")
            .json(body);
        if wait_for_model {
            request = request.header("x-wait-for-model", "true");
        }

        let response = request
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
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(HuginnError::RateLimited { retry_after })
            }
            503 => {
                // Cold model 503s carry {"error", "estimated_time"}; anything
                // else is an ordinary service error.
                let text = response.text().await.unwrap_or_default();
                match serde_json::from_str::<LoadingBody>(&text) {
                    Ok(loading) => Err(HuginnError::ModelLoading {
                        estimated: loading.estimated_time.map(Duration::from_secs_f64),
                    }),
                    Err(_) => Err(HuginnError::Api {
                        status: 503,
                        message: text,
                    }),
                }
            }
            code => Err(HuginnError::Api {
                status: code,
                message: format!("HuggingFace API error: {status}"),
            }),
        }
    }
}

#[async_trait]
impl InferenceProvider for HuggingFaceClient {
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

        let raw = match self.dispatch(&url, &body, false).await {
            Err(HuginnError::ModelLoading { estimated })
                if self.config.supports_wait_for_model =>
            {
                metrics::counter!(telemetry::MODEL_LOAD_RETRIES_TOTAL,
                    "provider" => self.config.name,
                    "model" => spec.id)
                .increment(1);
                debug!(
                    model = spec.id,
                    estimated_secs = estimated.map(|d| d.as_secs()),
                    "model cold, retrying once with wait-for-model"
                );
                self.limiter.await_slot().await;
                self.dispatch(&url, &body, true).await?
            }
            other => other?,
        };

        let mut result = (spec.parse_response)(raw)?;
        result.model = Some(spec.id.to_string());
        Ok(result)
    }
}
