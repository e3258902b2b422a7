//! Enum field map cache.
//!
//! One `EnumFieldMap` per record type, computed once and shared as an `Arc`.
//! Record type shapes are fixed for the life of the process, so entries are
//! never invalidated; `save` is last-writer-wins because two concurrent
//! resolutions of the same type always produce equal maps.

use crate::enums::EnumModel;
use dashmap::DashMap;
use derive_more::{Deref, IntoIterator};
use std::{collections::BTreeMap, fmt, sync::Arc};

///
/// EnumField
/// One (field name, enum type) pair.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EnumField<'a> {
    pub field: &'a str,
    pub enum_type: &'static EnumModel,
}

///
/// EnumFieldMap
///
/// Resolved enum fields of one record type.
/// Fields without an enum annotation never appear here.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct EnumFieldMap(BTreeMap<String, &'static EnumModel>);

impl EnumFieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, enum_type: &'static EnumModel) {
        self.0.insert(field.into(), enum_type);
    }

    pub fn fields(&self) -> impl Iterator<Item = EnumField<'_>> {
        self.0.iter().map(|(field, enum_type)| EnumField {
            field,
            enum_type: *enum_type,
        })
    }

    /// Enum type path for `field`, if it is an enum field.
    #[must_use]
    pub fn enum_type_of(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).map(|model| model.path)
    }
}

impl FromIterator<(String, &'static EnumModel)> for EnumFieldMap {
    fn from_iter<I: IntoIterator<Item = (String, &'static EnumModel)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// EnumFieldCache
///
/// Pluggable key/value backend keyed by record type name.
///

pub trait EnumFieldCache: Send + Sync {
    fn fetch(&self, record_type: &str) -> Option<Arc<EnumFieldMap>>;

    fn save(&self, record_type: &str, map: Arc<EnumFieldMap>);
}

///
/// MemoryCache
/// Default backend: unbounded, process-lifetime, sharded concurrent map.
///

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Arc<EnumFieldMap>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, record_type: &str) -> bool {
        self.entries.contains_key(record_type)
    }
}

impl EnumFieldCache for MemoryCache {
    fn fetch(&self, record_type: &str) -> Option<Arc<EnumFieldMap>> {
        self.entries
            .get(record_type)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn save(&self, record_type: &str, map: Arc<EnumFieldMap>) {
        self.entries.insert(record_type.to_string(), map);
    }
}

///
/// BoundedCache
///
/// Capacity-capped backend. An evicted record type is simply resolved again
/// on its next load.
///

#[derive(Clone)]
pub struct BoundedCache {
    inner: moka::sync::Cache<String, Arc<EnumFieldMap>>,
}

impl BoundedCache {
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: moka::sync::Cache::new(max_capacity),
        }
    }

    /// Approximate number of cached record types.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl fmt::Debug for BoundedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

impl EnumFieldCache for BoundedCache {
    fn fetch(&self, record_type: &str) -> Option<Arc<EnumFieldMap>> {
        self.inner.get(record_type)
    }

    fn save(&self, record_type: &str, map: Arc<EnumFieldMap>) {
        self.inner.insert(record_type.to_string(), map);
    }
}

///
/// TESTS
///
