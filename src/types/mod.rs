//! Core type definitions

pub mod capability;
pub mod message;
pub mod options;
pub mod result;

pub use capability::Capability;
pub use message::{ChatTurn, Sender};
pub use options::AskOptions;
pub use result::NormalizedResult;
