//! Logical task capabilities

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical task a caller can ask for, independent of any concrete model.
///
/// The registry maps each capability to an ordered list of model specs per
/// provider; adding a model never adds a capability variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Zero-shot classification against caller-supplied candidate labels.
    Classify,
    /// Abstractive summarization.
    Summarize,
    /// Extractive or generative question answering over a context.
    Answer,
    /// Sentiment polarity (positive / negative / neutral).
    Sentiment,
    /// Translation to the configured target language.
    Translate,
    /// Named-entity recognition.
    NamedEntities,
    /// Semantic similarity between the prompt and a comparison text.
    Similarity,
    /// Dense vector embedding of the prompt.
    Embedding,
    /// Masked-token completion.
    FillMask,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Capability; 9] = [
        Capability::Classify,
        Capability::Summarize,
        Capability::Answer,
        Capability::Sentiment,
        Capability::Translate,
        Capability::NamedEntities,
        Capability::Similarity,
        Capability::Embedding,
        Capability::FillMask,
    ];

    /// Stable string form, used in cache keys and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Classify => "classify",
            Capability::Summarize => "summarize",
            Capability::Answer => "answer",
            Capability::Sentiment => "sentiment",
            Capability::Translate => "translate",
            Capability::NamedEntities => "named-entities",
            Capability::Similarity => "similarity",
            Capability::Embedding => "embedding",
            Capability::FillMask => "fill-mask",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
