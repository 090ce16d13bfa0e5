//! Per-provider usage and health statistics.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Usage counters for one provider.
///
/// Mutated only by the orchestrator after each fallback-chain run; cache
/// hits are invisible here. Not persisted across restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderStats {
    /// Fallback-chain runs attempted against this provider.
    pub calls: u64,
    /// Runs that ended in exhaustion.
    pub errors: u64,
    /// Last successful use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<SystemTime>,
    /// Last exhaustion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error_at: Option<SystemTime>,
}

impl ProviderStats {
    pub(crate) fn record_success(&mut self) {
        self.calls += 1;
        self.last_used_at = Some(SystemTime::now());
    }

    pub(crate) fn record_exhaustion(&mut self) {
        self.calls += 1;
        self.errors += 1;
        self.last_error_at = Some(SystemTime::now());
    }
}

/// Health snapshot for one provider, for diagnostic callers.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderHealth {
    pub provider: String,
    /// Disabled for the process lifetime after an auth failure.
    pub disabled: bool,
    pub stats: ProviderStats,
}
