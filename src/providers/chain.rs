//! Fallback chain execution over registry-ordered model specs.
//!
//! The chain walks `registry.specs_for(provider, capability)` in order and
//! stops at the first success. Any failure advances to the next spec, with
//! one exception: an auth failure aborts the walk — a dead key fails
//! identically for every sibling model, so trying them only burns quota.
//!
//! Exhaustion (zero registered specs, or every attempt failed) is reported
//! as [`HuginnError::Exhausted`] carrying the per-model failure kinds, so
//! the orchestrator can log and fall through to the next provider.

use std::time::Instant;

use tracing::{debug, instrument, warn};

use super::traits::InferenceProvider;
use crate::registry::{ModelRegistry, RequestInput};
use crate::telemetry;
use crate::types::{Capability, NormalizedResult};
use crate::{HuginnError, ModelFailure, Result};

/// Run the fallback chain for one capability under one provider.
#[instrument(skip(provider, registry, input), fields(provider = provider.name(), capability = %capability))]
pub async fn run(
    provider: &dyn InferenceProvider,
    registry: &ModelRegistry,
    capability: Capability,
    input: &RequestInput<'_>,
) -> Result<NormalizedResult> {
    let specs = registry.specs_for(provider.name(), capability);
    let mut failures = Vec::with_capacity(specs.len());

    for spec in specs {
        let start = Instant::now();
        match provider.invoke(spec, input).await {
            Ok(result) => {
                record_attempt(provider.name(), capability, start, true);
                debug!(model = spec.id, "model attempt succeeded");
                return Ok(result);
            }
            Err(e) => {
                record_attempt(provider.name(), capability, start, false);
                let halt = e.halts_provider();
                failures.push(ModelFailure {
                    model: spec.id.to_string(),
                    kind: e.failure_kind(),
                });
                if halt {
                    warn!(model = spec.id, "auth failure, aborting chain");
                    break;
                }
                warn!(model = spec.id, error = %e, "model attempt failed, advancing");
            }
        }
    }

    Err(HuginnError::Exhausted { failures })
}

fn record_attempt(provider: &str, capability: Capability, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "provider" => provider.to_owned(),
        "capability" => capability.as_str(),
        "status" => status)
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "provider" => provider.to_owned(),
        "capability" => capability.as_str())
    .record(start.elapsed().as_secs_f64());
}
