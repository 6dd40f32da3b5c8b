//! Envelope classification.
//!
//! Routes every decoded envelope to exactly one handler path. The classifier
//! never mutates state; the engine acts on the returned `Route`.

pub mod classifier;

pub use classifier::{classify, Route};
