//! Response caching: content-addressed fingerprints and the TTL store.

pub mod fingerprint;
pub mod response;

pub use fingerprint::Fingerprint;
pub use response::{CacheConfig, ResponseCache};
