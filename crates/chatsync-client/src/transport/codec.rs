//! Decode-once codec for inbound frames.
//!
//! - Size limit is checked before any parsing.
//! - Text frames decode directly; binary frames must carry UTF-8 JSON.

use bytes::Bytes;

use chatsync_core::{
    error::{ChatSyncError, Result},
    protocol::inbound::{decode_envelope, decode_envelope_slice, Envelope},
};

/// One frame as delivered by the connection manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    Binary(Bytes),
    Close,
}

impl InboundFrame {
    pub fn len(&self) -> usize {
        match self {
            InboundFrame::Text(s) => s.len(),
            InboundFrame::Binary(b) => b.len(),
            InboundFrame::Close => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounded, lossy rendering for diagnostics.
    pub fn preview(&self, max_chars: usize) -> String {
        let text = match self {
            InboundFrame::Text(s) => s.clone(),
            InboundFrame::Binary(b) => String::from_utf8_lossy(b).into_owned(),
            InboundFrame::Close => return "<close>".into(),
        };
        if text.chars().count() <= max_chars {
            return text;
        }
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}

pub fn decode_frame(frame: &InboundFrame, max_frame_bytes: usize) -> Result<Envelope> {
    let len = frame.len();
    if len > max_frame_bytes {
        return Err(ChatSyncError::FrameTooLarge { len, max: max_frame_bytes });
    }
    match frame {
        InboundFrame::Text(s) => decode_envelope(s),
        InboundFrame::Binary(b) => decode_envelope_slice(b),
        InboundFrame::Close => Err(ChatSyncError::BadRequest(
            "close frame carries no envelope".into(),
        )),
    }
}
