//! Host contracts.
//!
//! The mapping layer, its annotation reader and its change-tracking store are
//! external collaborators. The listener depends only on these traits, so any
//! host (or a test fake) can plug in by implementing them.

use crate::{error::Error, types::TypeRef, value::Value};
use derive_more::Display;

///
/// FieldDescriptor
///
/// Reflective descriptor for one field of one record type.
/// `attributes` carries the raw declarations the annotation source reads.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldDescriptor<'a> {
    pub record_type: &'a str,
    pub name: &'a str,
    pub attributes: &'a [crate::model::Attribute],
}

///
/// EnumAnnotation
///
/// "This field holds enum type X", where X may be relative to the owning
/// record type's namespace.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumAnnotation {
    pub class: String,
}

impl EnumAnnotation {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }
}

///
/// AnnotationSource
///

pub trait AnnotationSource {
    fn enum_annotation(&self, field: &FieldDescriptor<'_>) -> Option<EnumAnnotation>;
}

impl<A: AnnotationSource + ?Sized> AnnotationSource for &A {
    fn enum_annotation(&self, field: &FieldDescriptor<'_>) -> Option<EnumAnnotation> {
        (**self).enum_annotation(field)
    }
}

///
/// RecordMetadata
///
/// Per-record-type metadata exposed by the mapping layer.
///

pub trait RecordMetadata<R: ?Sized> {
    fn record_type(&self) -> &str;

    /// Ordered names of all mapped fields.
    fn field_names(&self) -> Vec<&str>;

    fn field_descriptor(&self, field: &str) -> Result<FieldDescriptor<'_>, Error>;

    fn field_value(&self, record: &R, field: &str) -> Result<Value, Error>;

    fn set_field_value(&self, record: &mut R, field: &str, value: Value) -> Result<(), Error>;

    /// Resolve a possibly-relative type name in the context of this record type.
    fn resolve_type_name(&self, declared: &str) -> TypeRef;
}

///
/// Metadata
///
/// What the mapping layer handed back for a record type.
/// `Unsupported` names a metadata implementation this crate cannot read.
///

pub enum Metadata<'a, R: ?Sized> {
    Mapped(&'a dyn RecordMetadata<R>),
    Unsupported { kind: &'a str },
}

///
/// MetadataSource
///

pub trait MetadataSource {
    type Record: ?Sized;

    fn metadata(&self, record_type: &str) -> Result<Metadata<'_, Self::Record>, Error>;
}

///
/// RecordIdentity
/// Stable identity token of one live record instance.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("#{_0}")]
pub struct RecordIdentity(pub u64);

///
/// ChangeTracker
///
/// The mapping layer's snapshot of each field's clean value.
///

pub trait ChangeTracker {
    fn set_original_value(&mut self, record: RecordIdentity, field: &str, value: Value);
}

///
/// Session
///
/// Everything the load listener needs from the active mapping-layer session.
///

pub trait Session: MetadataSource {
    /// Runtime type name of `record`, used as the cache key.
    fn record_type_of(&self, record: &Self::Record) -> String;

    fn record_identity(&self, record: &Self::Record) -> RecordIdentity;

    fn change_tracker(&mut self) -> &mut dyn ChangeTracker;
}

///
/// LoadEvent
/// "Record loaded" notification.
///

pub struct LoadEvent<'a, S: Session + ?Sized> {
    pub record: &'a mut S::Record,
    pub session: &'a mut S,
}

impl<'a, S: Session + ?Sized> LoadEvent<'a, S> {
    pub const fn new(record: &'a mut S::Record, session: &'a mut S) -> Self {
        Self { record, session }
    }
}
