//! Provider clients, rate limiting, and the fallback chain.

pub mod chain;
pub mod config;
pub mod gemini;
pub mod huggingface;
pub mod limiter;
pub mod traits;

pub use config::ProviderConfig;
pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;
pub use limiter::RateLimiter;
pub use traits::InferenceProvider;
