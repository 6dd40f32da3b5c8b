//! chatsync core: transport-agnostic wire primitives and the shared error type.
//!
//! This crate defines the inbound envelope shape pushed by the chat server,
//! the viewer-independent envelope kind, and the two outbound frames a client
//! sends, all encoded with `serde_json`. It has no async runtime or I/O, so
//! the engine and offline tooling can both build on it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed frames surface as `ChatSyncError` so a bad frame never takes the
//! envelope loop down with it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ChatSyncError, ErrorCode, Result};
