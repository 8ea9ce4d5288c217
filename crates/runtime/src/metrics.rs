use std::collections::BTreeMap;

use serde::Serialize;

/// Interaction counters for the storefront.
///
/// Sorted maps keep snapshots in a stable order so they can be compared in
/// tests and diffed between two `storefront_stats()` calls.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metrics {
    counters: BTreeMap<&'static str, u64>,
    gauges: BTreeMap<&'static str, i64>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: Vec<(String, u64)>,
    pub gauges: Vec<(String, i64)>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.counters.clear();
        self.gauges.clear();
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn inc_counter(&mut self, name: &'static str, by: u64) {
        *self.counters.entry(name).or_insert(0) += by;
    }

    pub fn gauge(&self, name: &str) -> Option<i64> {
        self.gauges.get(name).copied()
    }

    pub fn set_gauge(&mut self, name: &'static str, value: i64) {
        self.gauges.insert(name, value);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self
                .counters
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            gauges: self.gauges.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Metrics;
    use pretty_assertions::assert_eq;

    #[test]
    fn counters_accumulate() {
        let mut m = Metrics::new();
        m.inc_counter("cart.add", 1);
        m.inc_counter("cart.add", 2);
        assert_eq!(m.counter("cart.add"), 3);
        assert_eq!(m.counter("missing"), 0);
    }

    #[test]
    fn gauges_overwrite() {
        let mut m = Metrics::new();
        assert_eq!(m.gauge("cart.lines"), None);
        m.set_gauge("cart.lines", 2);
        m.set_gauge("cart.lines", 1);
        assert_eq!(m.gauge("cart.lines"), Some(1));
    }

    #[test]
    fn snapshot_is_stably_sorted() {
        let mut m = Metrics::new();
        m.inc_counter("wishlist.toggle", 1);
        m.inc_counter("cart.add", 1);
        m.set_gauge("wishlist.len", 1);
        m.set_gauge("cart.lines", 2);

        let snap = m.snapshot();
        assert_eq!(
            snap.counters,
            vec![("cart.add".to_string(), 1), ("wishlist.toggle".to_string(), 1)]
        );
        assert_eq!(
            snap.gauges,
            vec![("cart.lines".to_string(), 2), ("wishlist.len".to_string(), 1)]
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut m = Metrics::new();
        m.inc_counter("search.run", 1);
        m.set_gauge("cart.lines", 1);
        m.clear();
        assert_eq!(m, Metrics::new());
    }
}
