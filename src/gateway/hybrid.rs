//! The hybrid orchestrator: cache, provider priority, degraded fallback.
//!
//! `ask` is the single entry point the host application calls. Its promise:
//! the caller always receives something renderable. Provider failures are
//! absorbed — first by the fallback chain within a provider, then by
//! falling through to the next provider, and finally by a deterministic,
//! clearly flagged degraded response. The only errors `ask` raises are
//! caller-side: no provider configured at all, or malformed input.
//!
//! # Flow
//!
//! ```text
//! ask(prompt, capability, options)
//!         │
//!         ▼
//!   ResponseCache ── hit ──► return (no provider, no limiter, no stats)
//!         │ miss
//!         ▼
//!   huggingface chain ── success ──► cache + stats + return
//!         │ exhausted
//!         ▼
//!   gemini chain ── success ──► cache + stats + return
//!         │ exhausted
//!         ▼
//!   degraded response (flagged, never an error)
//! ```

use std::sync::{Arc, Mutex};

use serde_json::json;
use tracing::{debug, instrument, warn};

use super::stats::{ProviderHealth, ProviderStats};
use crate::cache::{CacheConfig, Fingerprint, ResponseCache};
use crate::providers::chain;
use crate::providers::InferenceProvider;
use crate::registry::{ModelRegistry, RequestInput};
use crate::telemetry;
use crate::types::{AskOptions, Capability, NormalizedResult};
use crate::{HuginnError, ModelFailure, Result};

/// Fixed text of the degraded response. Deterministic so the host can also
/// match on it if it wants to.
const DEGRADED_TEXT: &str =
    "The assistant is temporarily unavailable. Please try again in a few minutes.";

/// Orchestrator over an ordered list of providers.
pub struct HybridGateway {
    providers: Vec<Arc<dyn InferenceProvider>>,
    registry: ModelRegistry,
    cache: ResponseCache,
    stats: Vec<Mutex<ProviderStats>>,
    last_used: Mutex<Option<String>>,
}

impl HybridGateway {
    /// Build a gateway over providers in priority order (index 0 tried first).
    pub fn new(
        providers: Vec<Arc<dyn InferenceProvider>>,
        registry: ModelRegistry,
        cache_config: &CacheConfig,
    ) -> Self {
        let stats = providers
            .iter()
            .map(|_| Mutex::new(ProviderStats::default()))
            .collect();
        Self {
            providers,
            registry,
            cache: ResponseCache::new(cache_config),
            stats,
            last_used: Mutex::new(None),
        }
    }

    /// Ask the AI.
    ///
    /// Never fails on provider trouble; see the module docs. Errors only on
    /// an empty provider list ([`HuginnError::NoProvider`]) or malformed
    /// input ([`HuginnError::InvalidInput`]).
    #[instrument(skip(self, prompt, options), fields(capability = %capability))]
    pub async fn ask(
        &self,
        prompt: &str,
        capability: Capability,
        options: &AskOptions,
    ) -> Result<NormalizedResult> {
        if self.providers.is_empty() {
            return Err(HuginnError::NoProvider);
        }
        validate(prompt, capability, options)?;

        let fingerprint = Fingerprint::compute(capability, prompt, options);
        if let Some(hit) = self.cache.get(&fingerprint, capability).await {
            debug!(%fingerprint, "cache hit");
            return Ok(hit);
        }

        let input = RequestInput {
            prompt,
            context: options.context.as_deref(),
            history: &options.history,
            labels: &options.labels,
        };

        let mut provider_failures: Vec<(String, Vec<ModelFailure>)> = Vec::new();
        for (provider, stats) in self.providers.iter().zip(&self.stats) {
            if provider.is_disabled() {
                debug!(provider = provider.name(), "skipping disabled provider");
                provider_failures.push((provider.name().to_string(), Vec::new()));
                continue;
            }

            match chain::run(provider.as_ref(), &self.registry, capability, &input).await {
                Ok(result) => {
                    stats.lock().expect("stats lock poisoned").record_success();
                    *self.last_used.lock().expect("last-used lock poisoned") =
                        Some(provider.name().to_string());
                    self.cache
                        .put(fingerprint, result.clone(), options.cache_ttl)
                        .await;
                    return Ok(result);
                }
                Err(e) => {
                    stats
                        .lock()
                        .expect("stats lock poisoned")
                        .record_exhaustion();
                    let failures = match e {
                        HuginnError::Exhausted { failures } => failures,
                        other => vec![ModelFailure {
                            model: String::new(),
                            kind: other.failure_kind(),
                        }],
                    };
                    warn!(
                        provider = provider.name(),
                        attempts = failures.len(),
                        "provider exhausted, falling through"
                    );
                    provider_failures.push((provider.name().to_string(), failures));
                }
            }
        }

        metrics::counter!(telemetry::DEGRADED_TOTAL,
            "capability" => capability.as_str())
        .increment(1);
        warn!("all providers exhausted, returning degraded response");
        Ok(degraded_response(capability, &provider_failures))
    }

    /// Health snapshot for every configured provider, in priority order.
    pub fn health(&self) -> Vec<ProviderHealth> {
        self.providers
            .iter()
            .zip(&self.stats)
            .map(|(provider, stats)| ProviderHealth {
                provider: provider.name().to_string(),
                disabled: provider.is_disabled(),
                stats: stats.lock().expect("stats lock poisoned").clone(),
            })
            .collect()
    }

    /// Name of the provider that served the most recent successful request.
    pub fn last_used_provider(&self) -> Option<String> {
        self.last_used
            .lock()
            .expect("last-used lock poisoned")
            .clone()
    }
}

/// Reject caller programming errors before touching cache or providers.
fn validate(prompt: &str, capability: Capability, options: &AskOptions) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(HuginnError::InvalidInput("prompt must not be empty".into()));
    }
    match capability {
        Capability::Classify if options.labels.is_empty() => Err(HuginnError::InvalidInput(
            "classify requires candidate labels".into(),
        )),
        Capability::Similarity if options.context.is_none() => Err(HuginnError::InvalidInput(
            "similarity requires a comparison text in context".into(),
        )),
        _ => Ok(()),
    }
}

fn degraded_response(
    capability: Capability,
    provider_failures: &[(String, Vec<ModelFailure>)],
) -> NormalizedResult {
    let providers: Vec<serde_json::Value> = provider_failures
        .iter()
        .map(|(name, failures)| {
            json!({
                "provider": name,
                "failures": failures
                    .iter()
                    .map(|f| json!({ "model": f.model, "kind": f.kind.as_str() }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    NormalizedResult::degraded(
        DEGRADED_TEXT,
        json!({
            "degraded": true,
            "capability": capability.as_str(),
            "providers": providers,
        }),
    )
}
