//! Wire formats.
//!
//! - Inbound: JSON envelopes pushed by the server (error, typing, or content).
//! - Outbound: the `message` and `typing` frames a client sends.
//!
//! Parsers are panic-free: malformed input is reported as `ChatSyncError`.

pub mod ids;
pub mod inbound;
pub mod outbound;

pub use ids::UserId;
pub use inbound::{decode_envelope, decode_envelope_slice, Envelope, EnvelopeKind, TypingSignal};
pub use outbound::OutboundFrame;
