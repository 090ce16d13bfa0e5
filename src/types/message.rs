//! Conversation history types

use serde::{Deserialize, Serialize};

/// Who produced a history turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One prior turn of the conversation, supplied by the host application.
///
/// Huginn never persists history; the host owns conversation state and
/// passes it in on each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub message: String,
}

impl ChatTurn {
    /// Create a user turn
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            message: message.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            message: message.into(),
        }
    }
}
