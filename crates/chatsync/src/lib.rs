//! Top-level facade crate for chatsync.
//!
//! Re-exports the wire primitives and the client engine so users can depend on a single crate.

pub mod core {
    pub use chatsync_core::*;
}

pub mod client {
    pub use chatsync_client::*;
}
