use std::collections::BTreeMap;

/// Well-known counter and gauge names.
pub mod names {
    pub const LOADS_STARTED: &str = "loads.started";
    pub const LOADS_APPLIED: &str = "loads.applied";
    pub const LOADS_FAILED: &str = "loads.failed";
    pub const LOADS_STALE: &str = "loads.stale";
    pub const OVERLAY_MARKERS: &str = "overlay.markers";
    pub const FARM_MARKERS: &str = "farms.markers";
    pub const CHAT_QUESTIONS: &str = "chat.questions";
    pub const CHAT_FAILURES: &str = "chat.failures";
}

/// Counters and gauges for the client session.
///
/// Sorted maps keep snapshots in a stable order for logs and CLI output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metrics {
    counters: BTreeMap<String, u64>,
    gauges: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub counters: Vec<(String, u64)>,
    pub gauges: Vec<(String, i64)>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn inc(&mut self, name: &str) {
        self.inc_counter(name, 1);
    }

    pub fn inc_counter(&mut self, name: impl Into<String>, by: u64) {
        *self.counters.entry(name.into()).or_insert(0) += by;
    }

    pub fn gauge(&self, name: &str) -> Option<i64> {
        self.gauges.get(name).copied()
    }

    pub fn set_gauge(&mut self, name: impl Into<String>, value: i64) {
        self.gauges.insert(name.into(), value);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self.counters.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            gauges: self.gauges.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Metrics, names};

    #[test]
    fn counters_accumulate() {
        let mut m = Metrics::new();
        m.inc(names::LOADS_STARTED);
        m.inc_counter(names::LOADS_STARTED, 2);
        assert_eq!(m.counter(names::LOADS_STARTED), 3);
        assert_eq!(m.counter(names::LOADS_STALE), 0);
    }

    #[test]
    fn gauges_overwrite() {
        let mut m = Metrics::new();
        assert_eq!(m.gauge(names::OVERLAY_MARKERS), None);
        m.set_gauge(names::OVERLAY_MARKERS, 10);
        m.set_gauge(names::OVERLAY_MARKERS, 4);
        assert_eq!(m.gauge(names::OVERLAY_MARKERS), Some(4));
    }

    #[test]
    fn snapshot_is_stably_sorted() {
        let mut m = Metrics::new();
        m.inc(names::LOADS_STALE);
        m.inc(names::LOADS_APPLIED);
        m.set_gauge("z", 1);
        m.set_gauge("m", 2);

        let snap = m.snapshot();
        assert_eq!(
            snap.counters,
            vec![
                (names::LOADS_APPLIED.to_string(), 1),
                (names::LOADS_STALE.to_string(), 1)
            ]
        );
        assert_eq!(
            snap.gauges,
            vec![("m".to_string(), 2), ("z".to_string(), 1)]
        );
    }
}
