//! Gateway construction and orchestration

pub mod builder;
pub mod hybrid;
pub mod stats;

pub use builder::{Huginn, HuginnBuilder};
pub use hybrid::HybridGateway;
pub use stats::{ProviderHealth, ProviderStats};
