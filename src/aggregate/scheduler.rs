use std::thread;

use thiserror::Error;

use crate::aggregate::counters::FlowCounters;
use crate::classify::classify;
use crate::lookup::LookupTable;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("{0} of {1} aggregation workers panicked; frequency tables are incomplete")]
    WorkerPanicked(usize, usize),
}

/// Partition `records` across `worker_count` threads and aggregate.
///
/// Batches are contiguous slices of size `len / worker_count`; the last
/// batch absorbs the remainder. When the worker count exceeds the record
/// count every batch but the last is empty, which is fine. Each worker
/// classifies its own batch and counts every hit; per-record problems
/// (short lines, unmapped protocols) are skipped inside `classify`, so a
/// worker only fails by panicking. All workers are joined before this
/// returns; a panic in any of them fails the whole run rather than
/// producing silently incomplete tables.
pub fn run_workers(
    records: &[String],
    lookup: &LookupTable,
    worker_count: usize,
) -> Result<FlowCounters, ScheduleError> {
    let worker_count = worker_count.max(1);
    let counters = FlowCounters::new();
    let batch_size = records.len() / worker_count;

    let panicked = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(worker_count);
        for i in 0..worker_count {
            let start = i * batch_size;
            let end = if i == worker_count - 1 {
                records.len()
            } else {
                start + batch_size
            };
            let batch = &records[start..end];
            let counters = &counters;
            handles.push(scope.spawn(move || {
                for line in batch {
                    if let Some(hit) = classify(line, lookup) {
                        counters.record(&hit.key, hit.tag);
                    }
                }
            }));
        }

        // Join every handle even after a failure, so the scope never
        // re-panics on an unjoined thread.
        handles
            .into_iter()
            .map(|handle| handle.join())
            .filter(Result::is_err)
            .count()
    });

    if panicked > 0 {
        return Err(ScheduleError::WorkerPanicked(panicked, worker_count));
    }
    Ok(counters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> LookupTable {
        LookupTable::from_lines(["Port,Protocol,Tag", "80,tcp,tag1", "53,udp,tag2"])
    }

    fn records() -> Vec<String> {
        vec![
            "a b c d e 80 f 6".to_string(),
            "a b c d e 53 f 17".to_string(),
            "bad line".to_string(),
        ]
    }

    #[test]
    fn test_end_to_end_counts() {
        let table = lookup();
        let counters = run_workers(&records(), &table, 2).unwrap();

        assert_eq!(counters.port_protocol_count("80,tcp"), 1);
        assert_eq!(counters.port_protocol_count("53,udp"), 1);
        assert_eq!(counters.tag_count("tag1"), 1);
        assert_eq!(counters.tag_count("tag2"), 1);
        // The malformed line contributes to neither table.
        assert_eq!(counters.port_protocol_counts().len(), 2);
        assert_eq!(counters.tag_counts().len(), 2);
    }

    #[test]
    fn test_unmapped_protocol_contributes_nothing() {
        let table = lookup();
        let recs = vec!["a b c d e 80 f 7".to_string()];
        let counters = run_workers(&recs, &table, 1).unwrap();
        assert!(counters.port_protocol_counts().is_empty());
        assert!(counters.tag_counts().is_empty());
    }

    #[test]
    fn test_missing_lookup_entry_counts_as_untagged() {
        let table = lookup();
        let recs = vec!["a b c d e 8080 f 6".to_string()];
        let counters = run_workers(&recs, &table, 1).unwrap();
        assert_eq!(counters.tag_count("Untagged"), 1);
        assert_eq!(counters.port_protocol_count("8080,tcp"), 1);
    }

    #[test]
    fn test_partition_invariance() {
        let table = lookup();
        let recs: Vec<String> = (0..97)
            .map(|i| match i % 3 {
                0 => "a b c d e 80 f 6".to_string(),
                1 => "a b c d e 53 f 17".to_string(),
                _ => format!("a b c d e {} f 6", i),
            })
            .collect();

        let baseline = run_workers(&recs, &table, 1).unwrap();
        for workers in [3, 10] {
            let counters = run_workers(&recs, &table, workers).unwrap();
            assert_eq!(counters.tag_counts(), baseline.tag_counts());
            assert_eq!(
                counters.port_protocol_counts(),
                baseline.port_protocol_counts()
            );
        }
    }

    #[test]
    fn test_more_workers_than_records() {
        let table = lookup();
        let counters = run_workers(&records(), &table, 16).unwrap();
        assert_eq!(counters.port_protocol_count("80,tcp"), 1);
        assert_eq!(counters.port_protocol_count("53,udp"), 1);
    }

    #[test]
    fn test_empty_input() {
        let table = lookup();
        let counters = run_workers(&[], &table, 4).unwrap();
        assert!(counters.tag_counts().is_empty());
        assert!(counters.port_protocol_counts().is_empty());
    }

    #[test]
    fn test_zero_workers_treated_as_one() {
        let table = lookup();
        let counters = run_workers(&records(), &table, 0).unwrap();
        assert_eq!(counters.tag_count("tag1"), 1);
    }
}
