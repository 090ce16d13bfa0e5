//! Per-request options

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::message::ChatTurn;

/// Options for an `ask` request (provider-agnostic).
///
/// ```rust
/// # use huginn::AskOptions;
/// let options = AskOptions::default()
///     .context("We keep the olive oil in the pantry.")
///     .labels(vec!["spending".into(), "inventory".into(), "general".into()]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskOptions {
    /// Supporting text: the QA context for `answer`, the comparison sentence
    /// for `similarity`, background for generative models otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Prior conversation turns, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<ChatTurn>,

    /// Candidate labels for `classify`. Required for that capability.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Per-call cache TTL override. Default: the cache-wide TTL (24 h).
    #[serde(skip)]
    pub cache_ttl: Option<Duration>,
}

impl AskOptions {
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }
}
