//! Typing presence of remote participants.

mod typing;

pub use typing::{TypingPresence, TypingTracker, TypingUpdate};
