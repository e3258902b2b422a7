use crate::{
    metadata::{ChangeTracker, RecordIdentity},
    traits::Entity,
    value::Value,
};
use std::collections::{BTreeMap, HashMap};

///
/// UnitOfWork
///
/// Minimal change-tracking store: the clean value of every tracked field,
/// per live record.
///
/// `snapshot` replaces whatever was stored for an identity, while
/// `set_original_value` patches it. Identities are only unique among
/// attached records, so callers `detach` a record before it goes away.
///

#[derive(Debug, Default)]
pub struct UnitOfWork {
    originals: HashMap<RecordIdentity, BTreeMap<String, Value>>,
}

impl UnitOfWork {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every mapped field of a freshly hydrated record.
    pub fn snapshot(&mut self, identity: RecordIdentity, record: &dyn Entity) {
        let fields = record
            .model()
            .field_names()
            .filter_map(|name| Some((name.to_string(), record.field(name)?.clone())))
            .collect();

        self.originals.insert(identity, fields);
    }

    #[must_use]
    pub fn original_value(&self, identity: RecordIdentity, field: &str) -> Option<&Value> {
        self.originals.get(&identity)?.get(field)
    }

    /// Fields whose current value differs from the clean snapshot.
    #[must_use]
    pub fn dirty_fields(&self, identity: RecordIdentity, record: &dyn Entity) -> Vec<&'static str> {
        record
            .model()
            .field_names()
            .filter(|name| record.field(name) != self.original_value(identity, name))
            .collect()
    }

    /// Forget a record, e.g. once it is detached.
    pub fn detach(&mut self, identity: RecordIdentity) {
        self.originals.remove(&identity);
    }

    #[must_use]
    pub fn tracked_records(&self) -> usize {
        self.originals.len()
    }
}

impl ChangeTracker for UnitOfWork {
    fn set_original_value(&mut self, record: RecordIdentity, field: &str, value: Value) {
        self.originals
            .entry(record)
            .or_default()
            .insert(field.to_string(), value);
    }
}
