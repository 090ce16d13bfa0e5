//! The single normalized output shape

use serde::{Deserialize, Serialize};

/// The one shape every model response is collapsed into, regardless of
/// source model family.
///
/// Classification scores, summaries, QA answers, translations, NER spans,
/// similarity scores and embeddings all produce a renderable `text`; the
/// structured payload survives untouched in `raw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Renderable answer text.
    pub text: String,

    /// Model-reported confidence in [0, 1], where the source model exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// The provider's response payload (or relevant portion), untouched.
    pub raw: serde_json::Value,

    /// Provider-qualified model that produced this result. Absent on
    /// degraded responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Set when every provider was exhausted and this is the templated
    /// best-effort response rather than a model output.
    #[serde(default)]
    pub degraded: bool,
}

impl NormalizedResult {
    /// Create a normal (non-degraded) result.
    pub fn new(
        text: impl Into<String>,
        confidence: Option<f64>,
        raw: serde_json::Value,
    ) -> Self {
        Self {
            text: text.into(),
            confidence,
            raw,
            model: None,
            degraded: false,
        }
    }

    /// Create a flagged degraded result.
    pub fn degraded(text: impl Into<String>, raw: serde_json::Value) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            raw,
            model: None,
            degraded: true,
        }
    }
}
