//! Telemetry metric name constants.
//!
//! Centralised metric names for huginn operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `huginn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider` — provider name ("huggingface", "gemini")
//! - `capability` — logical task invoked (e.g. "sentiment", "summarize")
//! - `model` — provider-qualified model identifier
//! - `status` — outcome: "ok" or "error"

/// Total model attempts dispatched through fallback chains.
///
/// Labels: `provider`, `capability`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "huginn_requests_total";

/// Per-attempt request duration in seconds.
///
/// Labels: `provider`, `capability`.
pub const REQUEST_DURATION_SECONDS: &str = "huginn_request_duration_seconds";

/// Total wait-for-model retries issued after a cold-start response.
///
/// Labels: `provider`, `model`.
pub const MODEL_LOAD_RETRIES_TOTAL: &str = "huginn_model_load_retries_total";

/// Total response cache hits.
///
/// Labels: `capability`.
pub const CACHE_HITS_TOTAL: &str = "huginn_cache_hits_total";

/// Total response cache misses.
///
/// Labels: `capability`.
pub const CACHE_MISSES_TOTAL: &str = "huginn_cache_misses_total";

/// Time spent blocked on the per-provider rate-limiter gate, in seconds.
///
/// Labels: `provider`.
pub const LIMITER_WAIT_SECONDS: &str = "huginn_limiter_wait_seconds";

/// Providers disabled for the process lifetime after an auth failure.
///
/// Labels: `provider`.
pub const PROVIDER_DISABLED_TOTAL: &str = "huginn_provider_disabled_total";

/// Requests answered with the templated degraded response.
///
/// Labels: `capability`.
pub const DEGRADED_TOTAL: &str = "huginn_degraded_total";
