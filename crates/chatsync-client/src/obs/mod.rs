//! Lightweight in-process metrics (dependency-free apart from `dashmap`).
//!
//! The engine records one outcome per frame; hosts render the registry in
//! Prometheus text format wherever they expose diagnostics.

pub mod metrics;

pub use metrics::EngineMetrics;
