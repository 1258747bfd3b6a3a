//! Chart rendering: PNG artifacts derived from the batch aggregates.

pub mod chart;

pub use chart::{event_times_chart, latency_histogram, throughput_histogram};
