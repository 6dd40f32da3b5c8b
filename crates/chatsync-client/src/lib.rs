//! chatsync client library entry.
//!
//! Wires the frame codec, envelope classifier, pending-message reconciler and
//! typing tracker into a per-conversation engine, plus an async session loop
//! that serializes all engine work on one task. Consumed by the replay binary
//! (`main.rs`) and by integration tests.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod obs;
pub mod presence;
pub mod reconcile;
pub mod transport;
pub mod view;

pub use engine::{ChatEngine, FrameOutcome};
pub use view::{ChatView, IdentityProvider, IncomingMessage, ViewHandle};
