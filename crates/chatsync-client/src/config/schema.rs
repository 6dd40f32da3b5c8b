use chatsync_core::error::{ChatSyncError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub engine: EngineSection,

    #[serde(default)]
    pub session: SessionSection,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            engine: EngineSection::default(),
            session: SessionSection::default(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ChatSyncError::UnsupportedVersion);
        }
        self.engine.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

/// How typing envelopes from several participants combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypingMode {
    /// One slot, last writer wins; any stop hides the banner.
    #[default]
    SingleSlot,
    /// Track each participant; the banner hides once nobody is typing.
    PerUser,
}

/// Which pending entries a self-echo delivers when several share its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Every textually identical pending entry.
    #[default]
    AllIdentical,
    /// Only the oldest matching entry.
    OldestFirst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    #[serde(default)]
    pub typing_mode: TypingMode,

    #[serde(default)]
    pub match_policy: MatchPolicy,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            max_frame_bytes: default_max_frame_bytes(),
            typing_mode: TypingMode::default(),
            match_policy: MatchPolicy::default(),
        }
    }
}

impl EngineSection {
    pub fn validate(&self) -> Result<()> {
        if !(64..=4 * 1024 * 1024).contains(&self.max_frame_bytes) {
            return Err(ChatSyncError::BadRequest(
                "engine.max_frame_bytes must be between 64 and 4194304".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            outbox_capacity: default_outbox_capacity(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=65536).contains(&self.outbox_capacity) {
            return Err(ChatSyncError::BadRequest(
                "session.outbox_capacity must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_frame_bytes() -> usize {
    65536
}
fn default_outbox_capacity() -> usize {
    256
}
