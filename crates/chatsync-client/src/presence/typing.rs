use chatsync_core::protocol::{TypingSignal, UserId};

use crate::config::TypingMode;

/// What the typing banner should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypingPresence {
    #[default]
    Hidden,
    Visible {
        user_id: Option<UserId>,
        user_name: String,
    },
}

impl TypingPresence {
    pub fn is_visible(&self) -> bool {
        matches!(self, TypingPresence::Visible { .. })
    }
}

/// Result of applying one typing signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingUpdate {
    /// Echo of the viewer's own typing; state untouched.
    Ignored,
    Unchanged,
    Changed,
}

/// Typing state for one open conversation.
///
/// `SingleSlot` keeps only the latest typer: a start overwrites whoever was
/// shown and any stop hides the banner, even a stop from someone who is not
/// the one displayed. `PerUser` tracks each typer and shows the most recent
/// one still typing.
#[derive(Debug, Default)]
pub struct TypingTracker {
    mode: TypingMode,
    current: TypingPresence,
    // PerUser only, oldest first.
    typers: Vec<(Option<UserId>, String)>,
}

impl TypingTracker {
    pub fn new(mode: TypingMode) -> Self {
        Self {
            mode,
            current: TypingPresence::Hidden,
            typers: Vec::new(),
        }
    }

    pub fn current(&self) -> &TypingPresence {
        &self.current
    }

    pub fn apply(&mut self, signal: &TypingSignal, viewer: &UserId) -> TypingUpdate {
        if signal.is_from(viewer) {
            return TypingUpdate::Ignored;
        }

        let next = match self.mode {
            TypingMode::SingleSlot => {
                if signal.is_typing {
                    TypingPresence::Visible {
                        user_id: signal.user_id.clone(),
                        user_name: signal.user_name().to_owned(),
                    }
                } else {
                    TypingPresence::Hidden
                }
            }
            TypingMode::PerUser => {
                self.typers.retain(|(id, _)| *id != signal.user_id);
                if signal.is_typing {
                    self.typers
                        .push((signal.user_id.clone(), signal.user_name().to_owned()));
                }
                match self.typers.last() {
                    Some((user_id, user_name)) => TypingPresence::Visible {
                        user_id: user_id.clone(),
                        user_name: user_name.clone(),
                    },
                    None => TypingPresence::Hidden,
                }
            }
        };

        if next == self.current {
            return TypingUpdate::Unchanged;
        }
        self.current = next;
        TypingUpdate::Changed
    }
}
