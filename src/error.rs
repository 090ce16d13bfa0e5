//! Huginn error types

use std::fmt;
use std::time::Duration;

/// Huginn error types
#[derive(Debug, thiserror::Error)]
pub enum HuginnError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// The remote model needs a cold start before it can serve requests.
    ///
    /// Providers that support it (HuggingFace) get exactly one retry with a
    /// wait-for-model directive; everyone else treats this as "try the next
    /// model".
    #[error("model is loading, estimated {estimated:?}")]
    ModelLoading { estimated: Option<Duration> },

    /// Fatal per provider: the API key is rejected. The owning client latches
    /// and refuses all further calls for the process lifetime.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The provider answered, but not in the shape the model spec's parser
    /// expects. Fallback chains advance past this to the next model.
    #[error("unparseable response: {0}")]
    BadResponse(String),

    #[error("empty response from model")]
    EmptyResponse,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("no provider configured")]
    NoProvider,

    /// Every model registered for a capability under one provider failed.
    /// Carries the per-model failure kinds for diagnostics.
    #[error("all models exhausted after {} failed attempts", .failures.len())]
    Exhausted { failures: Vec<ModelFailure> },
}

impl HuginnError {
    /// Whether this error is transient (the same call might succeed later).
    pub fn is_transient(&self) -> bool {
        match self {
            HuginnError::Http(_)
            | HuginnError::RateLimited { .. }
            | HuginnError::ModelLoading { .. }
            | HuginnError::EmptyResponse => true,
            HuginnError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Extract the provider's retry-after hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            HuginnError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Whether this error disables the whole provider for the session.
    ///
    /// Fallback chains abort on these instead of trying sibling models: a
    /// dead key fails the same way for every model under the provider.
    pub fn halts_provider(&self) -> bool {
        matches!(self, HuginnError::AuthenticationFailed)
    }

    /// Compact classification recorded in [`HuginnError::Exhausted`] diagnostics.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            HuginnError::Http(_) => FailureKind::Network,
            HuginnError::RateLimited { .. } => FailureKind::RateLimited,
            HuginnError::ModelLoading { .. } => FailureKind::ModelLoading,
            HuginnError::AuthenticationFailed => FailureKind::AuthInvalid,
            HuginnError::BadResponse(_) | HuginnError::EmptyResponse | HuginnError::Json(_) => {
                FailureKind::BadResponse
            }
            HuginnError::Api { .. } => FailureKind::Api,
            _ => FailureKind::Other,
        }
    }
}

/// One failed model attempt inside an exhausted fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFailure {
    /// Provider-qualified model identifier that was tried.
    pub model: String,
    pub kind: FailureKind,
}

/// Failure classification for chain diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    ModelLoading,
    AuthInvalid,
    BadResponse,
    Network,
    Api,
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::RateLimited => "rate-limited",
            FailureKind::ModelLoading => "model-loading",
            FailureKind::AuthInvalid => "auth-invalid",
            FailureKind::BadResponse => "bad-response",
            FailureKind::Network => "network",
            FailureKind::Api => "api",
            FailureKind::Other => "other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias for Huginn operations
pub type Result<T> = std::result::Result<T, HuginnError>;
