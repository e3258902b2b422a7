//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Resolution and materialization never touch metrics state directly; they
//! emit `MetricsEvent`s through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, RecordTypeSummary};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
