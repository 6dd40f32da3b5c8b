//! Optimistic-send reconciliation.
//!
//! The send path registers each locally rendered message as pending; a
//! self-echo from the server promotes matching entries to delivered. There is
//! no server-assigned correlation id, so matching is by exact message text.

mod board;
mod pending;

pub use board::{DeliveryBoard, DeliveryStatus, PendingId};
pub use pending::{PendingMessage, PendingSet};
