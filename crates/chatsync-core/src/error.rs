//! Shared error type across chatsync crates.

use thiserror::Error;

/// Stable error codes (used in logs, metrics and test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Frame is not a well-formed envelope.
    DecodeFailed,
    /// Binary frame did not carry UTF-8 text.
    InvalidUtf8,
    /// Frame exceeds the configured size limit.
    FrameTooLarge,
    /// Invalid input (config, arguments).
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// A view handle was registered as pending twice.
    DuplicatePending,
    /// An internal channel was closed.
    ChannelClosed,
    /// Transport send/receive failure.
    Transport,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DecodeFailed => "DECODE_FAILED",
            ErrorCode::InvalidUtf8 => "INVALID_UTF8",
            ErrorCode::FrameTooLarge => "FRAME_TOO_LARGE",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::DuplicatePending => "DUPLICATE_PENDING",
            ErrorCode::ChannelClosed => "CHANNEL_CLOSED",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ChatSyncError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum ChatSyncError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(String),
    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("view handle {0} already has a pending message")]
    DuplicatePending(u64),
    #[error("channel closed")]
    ChannelClosed,
    #[error("transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ChatSyncError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatSyncError::Decode(_) => ErrorCode::DecodeFailed,
            ChatSyncError::InvalidUtf8(_) => ErrorCode::InvalidUtf8,
            ChatSyncError::FrameTooLarge { .. } => ErrorCode::FrameTooLarge,
            ChatSyncError::BadRequest(_) => ErrorCode::BadRequest,
            ChatSyncError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            ChatSyncError::DuplicatePending(_) => ErrorCode::DuplicatePending,
            ChatSyncError::ChannelClosed => ErrorCode::ChannelClosed,
            ChatSyncError::Transport(_) => ErrorCode::Transport,
            ChatSyncError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Errors that only cost the current frame (the session keeps running).
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            ChatSyncError::Decode(_)
                | ChatSyncError::InvalidUtf8(_)
                | ChatSyncError::FrameTooLarge { .. }
        )
    }
}
