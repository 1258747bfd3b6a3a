//! Aggregation model: fold per-machine logs into cross-machine statistics.

use crate::log::MachineLog;
use serde::Serialize;

/// Cross-machine aggregates for one batch of timing logs.
///
/// All fields are empty/zero when no log was aggregated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    /// Events per machine, fixed by the first accepted log.
    pub event_count: usize,
    /// Per-event latency averaged over the aggregated machines, in ms.
    pub per_event_avg_ms: Vec<f64>,
    /// One entry per aggregated machine: its mean event latency, in ms.
    pub machine_avg_latency_ms: Vec<f64>,
    /// One entry per aggregated machine: its mean event rate, in events/sec.
    pub machine_avg_throughput: Vec<f64>,
    /// Number of machines that contributed to the aggregates.
    pub machines: usize,
    /// Number of logs rejected for an event-count mismatch or for being empty.
    pub skipped: usize,
}

/// Fold the parsed logs into cross-machine aggregates.
///
/// The first accepted log fixes the expected event count; a log with a
/// different count contributes nothing and is reported on stdout. Logs with
/// no event lines are rejected the same way.
pub fn aggregate(logs: &[MachineLog]) -> Aggregates {
    let mut expected: Option<usize> = None;
    let mut per_event_sum: Vec<f64> = Vec::new();
    let mut agg = Aggregates::default();

    for log in logs {
        let n = log.events.len();
        if n == 0 {
            println!("{}: no event lines; skipping", log.path.display());
            agg.skipped += 1;
            continue;
        }
        match expected {
            None => {
                expected = Some(n);
                per_event_sum = vec![0.0; n];
            }
            Some(want) if n != want => {
                println!(
                    "{}: ran {} events, expected {}; skipping",
                    log.path.display(),
                    n,
                    want
                );
                agg.skipped += 1;
                continue;
            }
            Some(_) => {}
        }

        let mut total_ms = 0.0;
        let mut total_rate = 0.0;
        for (i, event) in log.events.iter().enumerate() {
            per_event_sum[i] += event.latency_ms;
            total_ms += event.latency_ms;
            total_rate += event.throughput_per_sec;
        }
        agg.machine_avg_latency_ms.push(total_ms / n as f64);
        agg.machine_avg_throughput.push(total_rate / n as f64);
        agg.machines += 1;
    }

    if let Some(n) = expected {
        agg.event_count = n;
        agg.per_event_avg_ms = per_event_sum
            .into_iter()
            .map(|sum| sum / agg.machines as f64)
            .collect();
    }
    agg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::EventRow;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn machine(name: &str, micros: &[f64]) -> MachineLog {
        MachineLog {
            path: PathBuf::from(name),
            events: micros
                .iter()
                .map(|&us| EventRow {
                    latency_ms: us / 1000.0,
                    throughput_per_sec: 1_000_000.0 / us,
                })
                .collect(),
        }
    }

    #[test]
    fn single_machine_example() {
        let agg = aggregate(&[machine("a.dat", &[2000.0, 4000.0])]);

        assert_eq!(agg.event_count, 2);
        assert_eq!(agg.per_event_avg_ms, vec![2.0, 4.0]);
        assert_eq!(agg.machine_avg_latency_ms, vec![3.0]);
        assert_eq!(agg.machine_avg_throughput, vec![375.0]);
        assert_eq!(agg.machines, 1);
        assert_eq!(agg.skipped, 0);
    }

    #[test]
    fn averages_across_machines() {
        let agg = aggregate(&[
            machine("a.dat", &[2000.0, 4000.0]),
            machine("b.dat", &[4000.0, 8000.0]),
        ]);

        assert_eq!(agg.machines, 2);
        assert_eq!(agg.per_event_avg_ms, vec![3.0, 6.0]);
        assert_eq!(agg.machine_avg_latency_ms, vec![3.0, 6.0]);
        // Mean of per-event rates, not the reciprocal of the mean latency.
        assert_eq!(agg.machine_avg_throughput, vec![375.0, 187.5]);
    }

    #[test]
    fn grand_mean_identity() {
        let logs = [
            machine("a.dat", &[1000.0, 3000.0, 5000.0]),
            machine("b.dat", &[2000.0, 2000.0, 8000.0]),
            machine("c.dat", &[4000.0, 1000.0, 1000.0]),
        ];
        let agg = aggregate(&logs);

        let per_event_total: f64 = agg.per_event_avg_ms.iter().sum();
        let grand_sum: f64 = logs
            .iter()
            .flat_map(|l| l.events.iter().map(|e| e.latency_ms))
            .sum();
        assert!((per_event_total * agg.machines as f64 - grand_sum).abs() < 1e-9);
    }

    #[test]
    fn mismatched_log_contributes_nothing() {
        let agg = aggregate(&[
            machine("good.dat", &[2000.0, 4000.0]),
            machine("short.dat", &[1000.0]),
        ]);

        // Aggregates equal the conforming log's own values divided by 1.
        assert_eq!(agg.machines, 1);
        assert_eq!(agg.skipped, 1);
        assert_eq!(agg.per_event_avg_ms, vec![2.0, 4.0]);
        assert_eq!(agg.machine_avg_latency_ms, vec![3.0]);
    }

    #[test]
    fn empty_log_is_skipped() {
        let agg = aggregate(&[machine("empty.dat", &[]), machine("a.dat", &[2000.0])]);

        assert_eq!(agg.skipped, 1);
        assert_eq!(agg.machines, 1);
        assert_eq!(agg.event_count, 1);
        assert_eq!(agg.per_event_avg_ms, vec![2.0]);
    }

    #[test]
    fn no_logs_yields_empty_aggregates() {
        let agg = aggregate(&[]);
        assert_eq!(agg, Aggregates::default());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let logs = [
            machine("a.dat", &[2000.0, 4000.0]),
            machine("b.dat", &[3000.0, 6000.0]),
        ];
        assert_eq!(aggregate(&logs), aggregate(&logs));
    }
}
