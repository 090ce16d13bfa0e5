//! Model spec registry with fallback-priority ordering.
//!
//! The registry is declarative data, not logic: each row maps one capability
//! under one provider to a concrete remote model, with an attached request
//! builder and response parser. Adding a model is inserting a row; nothing
//! else in the crate branches on model identifiers.
//!
//! # Ordering
//!
//! `specs_for` returns rows in table order, and that order IS the fallback
//! priority — most general/reliable model first. An unknown or unregistered
//! (provider, capability) pair yields an empty list, never an error, so the
//! orchestrator can fall through to the other provider.

use std::fmt;

use crate::types::{Capability, ChatTurn, NormalizedResult};
use crate::Result;

pub mod gemini;
pub mod huggingface;

/// Borrowed view of one request's inputs, handed to spec builders.
#[derive(Debug, Clone, Copy)]
pub struct RequestInput<'a> {
    pub prompt: &'a str,
    /// QA context, similarity comparison text, or generative background.
    pub context: Option<&'a str>,
    /// Prior conversation turns, oldest first.
    pub history: &'a [ChatTurn],
    /// Candidate labels for classification.
    pub labels: &'a [String],
}

/// Builds the provider-specific JSON request body.
pub type BuildRequestFn = fn(&RequestInput<'_>) -> serde_json::Value;

/// Collapses the provider-specific response into a [`NormalizedResult`].
///
/// A shape mismatch is reported as [`HuginnError::BadResponse`](crate::HuginnError::BadResponse)
/// so fallback chains can advance.
pub type ParseResponseFn = fn(serde_json::Value) -> Result<NormalizedResult>;

/// One row of the registry: a concrete remote model plus the pair of
/// functions that adapt it to the normalized interface.
///
/// Specs are plain data (`Copy`, function pointers) created once at startup
/// and never mutated.
#[derive(Clone, Copy)]
pub struct ModelSpec {
    /// Provider that hosts this model ("huggingface", "gemini").
    pub provider: &'static str,
    pub capability: Capability,
    /// Provider-qualified model identifier.
    pub id: &'static str,
    /// Endpoint path under the provider's base URL.
    pub path: &'static str,
    pub build_request: BuildRequestFn,
    pub parse_response: ParseResponseFn,
}

impl fmt::Debug for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSpec")
            .field("provider", &self.provider)
            .field("capability", &self.capability)
            .field("id", &self.id)
            .field("path", &self.path)
            .finish()
    }
}

/// Registry of model specs, ordered by fallback priority within each
/// (provider, capability) pair.
pub struct ModelRegistry {
    specs: Vec<ModelSpec>,
}

impl ModelRegistry {
    /// The built-in tables for both providers.
    pub fn builtin() -> Self {
        let mut specs = huggingface::specs();
        specs.extend(gemini::specs());
        Self { specs }
    }

    /// Build a registry from custom specs (tests, alternative deployments).
    pub fn with_specs(specs: Vec<ModelSpec>) -> Self {
        Self { specs }
    }

    /// Ordered fallback list for a capability under one provider.
    ///
    /// Empty when the pair is unregistered — callers treat that as "this
    /// provider cannot serve the capability", not as an error.
    pub fn specs_for(&self, provider: &str, capability: Capability) -> Vec<&ModelSpec> {
        self.specs
            .iter()
            .filter(|s| s.provider == provider && s.capability == capability)
            .collect()
    }

    /// All registered specs, in table order.
    pub fn specs(&self) -> &[ModelSpec] {
        &self.specs
    }
}
