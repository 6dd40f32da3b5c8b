//! Collaborator seams: the view layer and the identity provider.
//!
//! The engine decides what happened; implementations of these traits decide
//! how it looks. All callbacks are synchronous and infallible.

use chatsync_core::protocol::UserId;

use crate::presence::TypingPresence;

/// Opaque handle to a rendered message element, owned by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u64);

/// A peer message to append to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender_id: Option<UserId>,
    pub sender_name: Option<String>,
    pub message: Option<String>,
    pub sender_type: Option<String>,
    pub timestamp: Option<String>,
}

/// View layer callbacks.
pub trait ChatView {
    /// Surface a server-reported error.
    fn display_error(&mut self, message: &str);

    /// Append a message authored by another participant.
    fn append_incoming_message(&mut self, msg: &IncomingMessage);

    /// Flip a pending message's status indicator to delivered.
    fn mark_delivered(&mut self, handle: ViewHandle);

    /// Typing banner changed.
    fn typing_changed(&mut self, presence: &TypingPresence);
}

/// Read-only source of the viewer's own id, queried once per envelope.
pub trait IdentityProvider {
    fn viewer_id(&self) -> UserId;
}

impl IdentityProvider for UserId {
    fn viewer_id(&self) -> UserId {
        self.clone()
    }
}
