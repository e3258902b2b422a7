use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for listener activity.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) record_types: BTreeMap<String, RecordTypeCounters>,
}

impl EventState {
    pub(crate) fn entry(&mut self, record_type: &str) -> &mut RecordTypeCounters {
        self.record_types
            .entry(record_type.to_string())
            .or_default()
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Listener entrypoints
    pub load_calls: u64,

    // Enum field map cache
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub resolutions: u64,
    pub resolution_failures: u64,

    // Materialization
    pub fields_materialized: u64,
    pub fields_skipped: u64,
    pub invalid_values: u64,
}

///
/// RecordTypeCounters
///

#[derive(Clone, Debug, Default)]
pub(crate) struct RecordTypeCounters {
    pub(crate) load_calls: u64,
    pub(crate) cache_hits: u64,
    pub(crate) cache_misses: u64,
    pub(crate) resolutions: u64,
    pub(crate) resolution_failures: u64,
    pub(crate) enum_fields: u64,
    pub(crate) fields_materialized: u64,
    pub(crate) fields_skipped: u64,
    pub(crate) invalid_values: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
/// Event/counter report; runtime metrics only.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub record_types: Vec<RecordTypeSummary>,
}

impl EventReport {
    /// Find the summary row for one record type.
    #[must_use]
    pub fn record_type(&self, path: &str) -> Option<&RecordTypeSummary> {
        self.record_types.iter().find(|row| row.path == path)
    }
}

///
/// RecordTypeSummary
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RecordTypeSummary {
    pub path: String,
    pub load_calls: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub resolutions: u64,
    pub resolution_failures: u64,
    pub enum_fields: u64,
    pub fields_materialized: u64,
    pub fields_skipped: u64,
    pub invalid_values: u64,
}

/// Build a metrics report, ordered by load activity then path.
#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(|state| {
        let mut record_types: Vec<RecordTypeSummary> = state
            .record_types
            .iter()
            .map(|(path, c)| RecordTypeSummary {
                path: path.clone(),
                load_calls: c.load_calls,
                cache_hits: c.cache_hits,
                cache_misses: c.cache_misses,
                resolutions: c.resolutions,
                resolution_failures: c.resolution_failures,
                enum_fields: c.enum_fields,
                fields_materialized: c.fields_materialized,
                fields_skipped: c.fields_skipped,
                invalid_values: c.invalid_values,
            })
            .collect();

        record_types.sort_by(|a, b| {
            b.load_calls
                .cmp(&a.load_calls)
                .then_with(|| a.path.cmp(&b.path))
        });

        EventReport {
            ops: state.ops.clone(),
            record_types,
        }
    })
}

///
/// TESTS
///
