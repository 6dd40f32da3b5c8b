//! Outbound frames (client -> server).

use serde::Serialize;

use crate::error::{ChatSyncError, Result};

/// A frame the send path writes to the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundFrame {
    /// `{"message": "..."}`
    Message { message: String },
    /// `{"typing": true|false}`
    Typing { typing: bool },
}

impl OutboundFrame {
    pub fn message(text: impl Into<String>) -> Self {
        OutboundFrame::Message { message: text.into() }
    }

    pub fn typing(is_typing: bool) -> Self {
        OutboundFrame::Typing { typing: is_typing }
    }

    /// Serialize to a text frame.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ChatSyncError::Internal(format!("json encode failed: {e}")))
    }
}
