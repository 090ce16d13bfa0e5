//! The provider seam.
//!
//! Each remote service gets one client implementing [`InferenceProvider`].
//! The fallback chain and orchestrator only ever see the trait, so
//! provider-specific auth, headers and retry quirks stay inside the client.

use async_trait::async_trait;

use crate::registry::{ModelSpec, RequestInput};
use crate::types::NormalizedResult;
use crate::Result;

/// A remote inference service that can execute registry model specs.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Provider name, matching the registry's spec rows.
    fn name(&self) -> &str;

    /// True once the provider has been disabled for the process lifetime
    /// (rejected API key). Disabled providers are skipped without HTTP.
    fn is_disabled(&self) -> bool;

    /// Execute one model spec: claim a rate-limit slot, dispatch the built
    /// request, map provider status codes onto the error taxonomy, and run
    /// the spec's parser on success.
    async fn invoke(
        &self,
        spec: &ModelSpec,
        input: &RequestInput<'_>,
    ) -> Result<NormalizedResult>;
}
