//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use super::HybridGateway;
use crate::cache::CacheConfig;
use crate::providers::{GeminiClient, HuggingFaceClient, InferenceProvider, ProviderConfig};
use crate::registry::ModelRegistry;
use crate::{HuginnError, Result};

/// Main entry point for creating gateway instances.
pub struct Huginn;

impl Huginn {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> HuginnBuilder {
        HuginnBuilder::new()
    }
}

/// Builder for configuring gateway instances.
///
/// Provider API keys are the enablement switch: a missing key disables that
/// provider entirely, and configuring no provider at all is a
/// [`HuginnError::NoProvider`] configuration error at `build()`.
pub struct HuginnBuilder {
    huggingface_key: Option<String>,
    gemini_key: Option<String>,
    cache: CacheConfig,
    timeout_secs: Option<u64>,
}

impl HuginnBuilder {
    pub fn new() -> Self {
        Self {
            huggingface_key: None,
            gemini_key: None,
            cache: CacheConfig::default(),
            timeout_secs: None,
        }
    }

    /// Configure the HuggingFace provider (primary: task-specific models).
    pub fn huggingface(mut self, api_key: impl Into<String>) -> Self {
        self.huggingface_key = Some(api_key.into());
        self
    }

    /// Configure the Gemini provider (fallback: prompt-driven generalist).
    pub fn gemini(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_key = Some(api_key.into());
        self
    }

    /// Read provider keys from `HUGGINGFACE_API_KEY` and `GEMINI_API_KEY`.
    ///
    /// An absent or empty variable leaves that provider disabled.
    pub fn from_env(mut self) -> Self {
        if let Ok(key) = std::env::var("HUGGINGFACE_API_KEY")
            && !key.is_empty()
        {
            self.huggingface_key = Some(key);
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY")
            && !key.is_empty()
        {
            self.gemini_key = Some(key);
        }
        self
    }

    /// Configure the response cache.
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Set the per-call HTTP timeout for all providers (seconds).
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<HybridGateway> {
        if self.huggingface_key.is_none() && self.gemini_key.is_none() {
            return Err(HuginnError::NoProvider);
        }

        let timeout = Duration::from_secs(self.timeout_secs.unwrap_or(30));
        let mut providers: Vec<Arc<dyn InferenceProvider>> = Vec::new();

        // Registration order is priority order: HuggingFace's task-specific
        // models first, the Gemini generalist as the fallback.
        if let Some(key) = self.huggingface_key {
            let config = ProviderConfig::huggingface().timeout(timeout);
            providers.push(Arc::new(HuggingFaceClient::with_config(key, config)));
        }
        if let Some(key) = self.gemini_key {
            let config = ProviderConfig::gemini().timeout(timeout);
            providers.push(Arc::new(GeminiClient::with_config(key, config)));
        }

        Ok(HybridGateway::new(
            providers,
            ModelRegistry::builtin(),
            &self.cache,
        ))
    }
}

impl Default for HuginnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
