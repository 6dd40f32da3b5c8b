use chatsync_core::protocol::{Envelope, EnvelopeKind, TypingSignal, UserId};

use crate::view::IncomingMessage;

/// Handler path chosen for one envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Server-reported error text.
    ServerError(String),
    /// Typing presence (may still be the viewer's own echo).
    Typing(TypingSignal),
    /// Content authored by the viewer: a delivery confirmation.
    SelfEcho { message: Option<String> },
    /// Content authored by someone else.
    Peer(IncomingMessage),
}

impl Route {
    pub fn kind(&self) -> EnvelopeKind {
        match self {
            Route::ServerError(_) => EnvelopeKind::Error,
            Route::Typing(_) => EnvelopeKind::Typing,
            Route::SelfEcho { .. } | Route::Peer(_) => EnvelopeKind::Content,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::ServerError(_) => "server_error",
            Route::Typing(_) => "typing",
            Route::SelfEcho { .. } => "self_echo",
            Route::Peer(_) => "peer",
        }
    }
}

/// First match wins: error, typing, then content split on `sender_id == viewer`.
///
/// Total over decoded envelopes: content without a sender is a peer message.
pub fn classify(env: Envelope, viewer: &UserId) -> Route {
    let Envelope {
        error,
        typing,
        sender_id,
        sender_name,
        message,
        sender_type,
        timestamp,
    } = env;

    if let Some(text) = error {
        return Route::ServerError(text);
    }
    if let Some(signal) = typing {
        return Route::Typing(signal);
    }
    if sender_id.as_ref() == Some(viewer) {
        return Route::SelfEcho { message };
    }
    Route::Peer(IncomingMessage {
        sender_id,
        sender_name,
        message,
        sender_type,
        timestamp,
    })
}
