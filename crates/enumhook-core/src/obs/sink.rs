//! Metrics sink boundary.
//!
//! Listener logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between listener logic
//! and the thread-local metrics state.
use crate::obs::metrics;
use std::cell::Cell;

thread_local! {
    static SINK_OVERRIDE: Cell<Option<&'static dyn MetricsSink>> = const { Cell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent<'a> {
    LoadStart {
        record_type: &'a str,
    },
    CacheHit {
        record_type: &'a str,
    },
    CacheMiss {
        record_type: &'a str,
    },
    Resolved {
        record_type: &'a str,
        enum_fields: u64,
    },
    ResolveFailed {
        record_type: &'a str,
    },
    FieldMaterialized {
        record_type: &'a str,
        field: &'a str,
    },
    FieldSkipped {
        record_type: &'a str,
        field: &'a str,
    },
    InvalidValue {
        record_type: &'a str,
        field: &'a str,
    },
}

///
/// MetricsSink
/// Sinks are shared by listeners across threads, hence `Sync`.
///

pub trait MetricsSink: Sync {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::LoadStart { record_type } => metrics::with_state_mut(|m| {
                m.ops.load_calls = m.ops.load_calls.saturating_add(1);
                let entry = m.entry(record_type);
                entry.load_calls = entry.load_calls.saturating_add(1);
            }),

            MetricsEvent::CacheHit { record_type } => metrics::with_state_mut(|m| {
                m.ops.cache_hits = m.ops.cache_hits.saturating_add(1);
                let entry = m.entry(record_type);
                entry.cache_hits = entry.cache_hits.saturating_add(1);
            }),

            MetricsEvent::CacheMiss { record_type } => metrics::with_state_mut(|m| {
                m.ops.cache_misses = m.ops.cache_misses.saturating_add(1);
                let entry = m.entry(record_type);
                entry.cache_misses = entry.cache_misses.saturating_add(1);
            }),

            MetricsEvent::Resolved {
                record_type,
                enum_fields,
            } => metrics::with_state_mut(|m| {
                m.ops.resolutions = m.ops.resolutions.saturating_add(1);
                let entry = m.entry(record_type);
                entry.resolutions = entry.resolutions.saturating_add(1);
                entry.enum_fields = enum_fields;
            }),

            MetricsEvent::ResolveFailed { record_type } => metrics::with_state_mut(|m| {
                m.ops.resolution_failures = m.ops.resolution_failures.saturating_add(1);
                let entry = m.entry(record_type);
                entry.resolution_failures = entry.resolution_failures.saturating_add(1);
            }),

            MetricsEvent::FieldMaterialized { record_type, .. } => metrics::with_state_mut(|m| {
                m.ops.fields_materialized = m.ops.fields_materialized.saturating_add(1);
                let entry = m.entry(record_type);
                entry.fields_materialized = entry.fields_materialized.saturating_add(1);
            }),

            MetricsEvent::FieldSkipped { record_type, .. } => metrics::with_state_mut(|m| {
                m.ops.fields_skipped = m.ops.fields_skipped.saturating_add(1);
                let entry = m.entry(record_type);
                entry.fields_skipped = entry.fields_skipped.saturating_add(1);
            }),

            MetricsEvent::InvalidValue { record_type, .. } => metrics::with_state_mut(|m| {
                m.ops.invalid_values = m.ops.invalid_values.saturating_add(1);
                let entry = m.entry(record_type);
                entry.invalid_values = entry.invalid_values.saturating_add(1);
            }),
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    match SINK_OVERRIDE.with(Cell::get) {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state for host/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub(crate) fn with_metrics_sink<T>(sink: &'static dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<&'static dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| cell.set(self.0));
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.replace(Some(sink)));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingSink(AtomicU64);

    impl MetricsSink for CountingSink {
        fn record(&self, _: MetricsEvent<'_>) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn override_captures_events_and_is_restored() {
        static SINK: CountingSink = CountingSink(AtomicU64::new(0));
        metrics_reset_all();

        with_metrics_sink(&SINK, || {
            record(MetricsEvent::CacheMiss { record_type: "t::A" });
            record(MetricsEvent::CacheHit { record_type: "t::A" });
        });
        record(MetricsEvent::CacheHit { record_type: "t::A" });

        assert_eq!(SINK.0.load(Ordering::Relaxed), 2);
        let report = metrics_report();
        assert_eq!(report.ops.cache_hits, 1);
        assert_eq!(report.ops.cache_misses, 0);
    }

    #[test]
    fn override_is_restored_after_panic() {
        static SINK: CountingSink = CountingSink(AtomicU64::new(0));

        let result = std::panic::catch_unwind(|| {
            with_metrics_sink(&SINK, || panic!("boom"));
        });

        assert!(result.is_err());
        assert!(SINK_OVERRIDE.with(Cell::get).is_none());
    }
}
