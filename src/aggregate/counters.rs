use std::collections::HashMap;

use dashmap::DashMap;

/// The two shared frequency tables produced by aggregation.
///
/// Both maps are sharded concurrent maps, so workers increment them
/// through `&self` with no external locking. Each increment is a single
/// atomic increment-or-insert on its key; increments commute, so the
/// final totals do not depend on worker scheduling. Nothing ever removes
/// or resets an entry.
#[derive(Debug, Default)]
pub struct FlowCounters {
    tag_counts: DashMap<String, u64>,
    port_protocol_counts: DashMap<String, u64>,
}

impl FlowCounters {
    pub fn new() -> FlowCounters {
        FlowCounters::default()
    }

    /// Count one classified record: bumps the "port,protocol" total and
    /// the tag total by one each. The two updates are independent; only
    /// the per-key increment itself is atomic.
    pub fn record(&self, key: &str, tag: &str) {
        *self
            .port_protocol_counts
            .entry(key.to_string())
            .or_insert(0) += 1;
        *self.tag_counts.entry(tag.to_string()).or_insert(0) += 1;
    }

    pub fn tag_count(&self, tag: &str) -> u64 {
        self.tag_counts.get(tag).map(|c| *c).unwrap_or(0)
    }

    pub fn port_protocol_count(&self, key: &str) -> u64 {
        self.port_protocol_counts.get(key).map(|c| *c).unwrap_or(0)
    }

    /// Snapshot of the tag table for reporting. Only meaningful after
    /// all workers have joined.
    pub fn tag_counts(&self) -> HashMap<String, u64> {
        self.tag_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Snapshot of the port-protocol table for reporting.
    pub fn port_protocol_counts(&self) -> HashMap<String, u64> {
        self.port_protocol_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_record_updates_both_tables() {
        let counters = FlowCounters::new();
        counters.record("80,tcp", "tag1");
        counters.record("80,tcp", "tag1");
        counters.record("53,udp", "tag1");

        assert_eq!(counters.port_protocol_count("80,tcp"), 2);
        assert_eq!(counters.port_protocol_count("53,udp"), 1);
        assert_eq!(counters.tag_count("tag1"), 3);
        assert_eq!(counters.tag_count("missing"), 0);
    }

    #[test]
    fn test_concurrent_increments_lose_nothing() {
        let counters = FlowCounters::new();
        let threads: u64 = 10;
        let per_thread: u64 = 1000;

        thread::scope(|scope| {
            for _ in 0..threads {
                scope.spawn(|| {
                    for _ in 0..per_thread {
                        counters.record("80,tcp", "tag1");
                    }
                });
            }
        });

        assert_eq!(counters.port_protocol_count("80,tcp"), threads * per_thread);
        assert_eq!(counters.tag_count("tag1"), threads * per_thread);
    }

    #[test]
    fn test_snapshots_match_single_key_reads() {
        let counters = FlowCounters::new();
        counters.record("443,tcp", "web");
        counters.record("443,tcp", "web");

        let tags = counters.tag_counts();
        let combos = counters.port_protocol_counts();
        assert_eq!(tags.get("web"), Some(&2));
        assert_eq!(combos.get("443,tcp"), Some(&2));
        assert_eq!(tags.len(), 1);
        assert_eq!(combos.len(), 1);
    }
}
