//! Huginn - resilient inference orchestration over free-tier AI providers
//!
//! This crate gives a host application one `ask` call backed by two
//! independent, rate-limited, individually unreliable inference providers.
//! Requests are cached by content, paced per provider, retried within
//! bounds, and walked down an ordered fallback chain of substitute models —
//! across providers when necessary — so the caller always gets something
//! renderable back.
//!
//! # Example
//!
//! ```rust,no_run
//! use huginn::{AskOptions, Capability, Huginn};
//!
//! #[tokio::main]
//! async fn main() -> huginn::Result<()> {
//!     let gateway = Huginn::builder()
//!         .huggingface("hf_your_key")
//!         .gemini("your_gemini_key")
//!         .build()?;
//!
//!     let result = gateway
//!         .ask("I love this app", Capability::Sentiment, &AskOptions::default())
//!         .await?;
//!
//!     println!("{} (confidence: {:?})", result.text, result.confidence);
//!     Ok(())
//! }
//! ```
//!
//! # Degraded service
//!
//! When every model under every provider fails, `ask` returns a flagged
//! [`NormalizedResult`] with `degraded: true` instead of an error; the host
//! can render it directly or show a reduced-confidence hint. Per-provider
//! usage and health are available from [`HybridGateway::health`].

pub mod cache;
pub mod error;
pub mod gateway;
pub mod providers;
pub mod registry;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use error::{FailureKind, HuginnError, ModelFailure, Result};
pub use gateway::{Huginn, HuginnBuilder, HybridGateway, ProviderHealth, ProviderStats};

// Re-export all types
pub use cache::{CacheConfig, Fingerprint, ResponseCache};
pub use providers::{
    GeminiClient, HuggingFaceClient, InferenceProvider, ProviderConfig, RateLimiter,
};
pub use registry::{ModelRegistry, ModelSpec, RequestInput};
pub use types::{AskOptions, Capability, ChatTurn, NormalizedResult, Sender};
