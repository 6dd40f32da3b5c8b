//! Transport seam.
//!
//! The connection manager (reconnects, backoff) lives outside this crate. It
//! plugs in through `Transport`; the session loop decodes frames once and
//! feeds them to the engine in arrival order.

pub mod codec;
pub mod link;
pub mod session;

pub use codec::{decode_frame, InboundFrame};
pub use link::{ChannelPeer, ChannelTransport, StreamTransport, Transport};
pub use session::{outbox, run_session, Command, Outbox};
