//! Minimal metrics registry for the engine.
//!
//! Counters and gauges with dynamic labels backed by `DashMap`. Label sets are
//! flattened into sorted key vectors so rendering order is deterministic per key.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn render_labels(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, render_labels(r.key()), val);
        }
    }
}

#[derive(Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub fn add(&self, v: i64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge\n{} {}", name, name, self.get());
    }
}

#[derive(Default)]
pub struct EngineMetrics {
    /// Frames by outcome label.
    pub frames: CounterVec,
    /// Pending entries promoted to delivered.
    pub delivered: AtomicU64,
    /// Entries currently awaiting a self-echo.
    pub pending: Gauge,
}

impl EngineMetrics {
    pub fn record_frame(&self, outcome: &str) {
        self.frames.inc(&[("outcome", outcome)]);
    }

    pub fn frames_with(&self, outcome: &str) -> u64 {
        self.frames.get(&[("outcome", outcome)])
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.frames.render("chatsync_frames_total", &mut out);
        let _ = writeln!(
            out,
            "# TYPE chatsync_delivered_total counter\nchatsync_delivered_total {}",
            self.delivered.load(Ordering::Relaxed)
        );
        self.pending.render("chatsync_pending_messages", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_order_does_not_matter() {
        let c = CounterVec::default();
        c.inc(&[("a", "1"), ("b", "2")]);
        c.inc(&[("b", "2"), ("a", "1")]);
        assert_eq!(c.get(&[("a", "1"), ("b", "2")]), 2);
    }

    #[test]
    fn render_contains_series() {
        let m = EngineMetrics::default();
        m.record_frame("peer");
        m.pending.add(2);
        let text = m.render();
        assert!(text.contains("chatsync_frames_total{outcome=\"peer\"} 1"));
        assert!(text.contains("chatsync_pending_messages 2"));
        assert!(text.contains("chatsync_delivered_total 0"));
    }

    #[test]
    fn escapes_label_values() {
        assert_eq!(escape_label("a\"b\n"), "a\\\"b\\n");
    }
}
