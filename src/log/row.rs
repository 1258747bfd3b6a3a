use std::path::PathBuf;

/// One timed event from a machine's log, after unit conversion.
///
/// The raw log field is in microseconds; we keep the two derived views of
/// it that the aggregates need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    /// Time the server spent on this event, in milliseconds.
    pub latency_ms: f64,
    /// Rate implied by this event alone, in events per second.
    pub throughput_per_sec: f64,
}

/// All event rows parsed from one machine's log, in event order.
#[derive(Debug, Clone)]
pub struct MachineLog {
    pub path: PathBuf,
    pub events: Vec<EventRow>,
}
