//! Counting fakes for the host contracts.
//!
//! The fakes record how often the listener reaches into the mapping layer, so
//! tests can assert that cache hits stay off the metadata path entirely.

use crate::{
    ENUM_ATTRIBUTE,
    adapter::AttributeAnnotations,
    enums::{EnumMember, EnumModel},
    error::{Error, HostError},
    metadata::{
        AnnotationSource, ChangeTracker, EnumAnnotation, FieldDescriptor, Metadata,
        MetadataSource, RecordIdentity, RecordMetadata, Session,
    },
    model::Attribute,
    types::{TypeRef, TypeRegistry},
    value::{MemberValue, Value},
};
use std::{
    cell::Cell,
    collections::{BTreeMap, HashMap},
};

pub(crate) const TICKET: &str = "test_support::Ticket";
pub(crate) const INVOICE: &str = "test_support::Invoice";
pub(crate) const MONEY: &str = "test_support::Money";

pub(crate) static STATUS: EnumModel = EnumModel {
    path: "test_support::Status",
    members: &[
        EnumMember {
            name: "Active",
            value: MemberValue::Text("A"),
        },
        EnumMember {
            name: "Closed",
            value: MemberValue::Text("C"),
        },
    ],
};

pub(crate) static PRIORITY: EnumModel = EnumModel {
    path: "test_support::Priority",
    members: &[
        EnumMember {
            name: "Low",
            value: MemberValue::Int(1),
        },
        EnumMember {
            name: "Normal",
            value: MemberValue::Int(2),
        },
        EnumMember {
            name: "High",
            value: MemberValue::Int(3),
        },
    ],
};

fn test_types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types.register_enum_model(&STATUS);
    types.register_enum_model(&PRIORITY);
    types.register_other(MONEY);

    types
}

const fn enum_attr(declared: &'static str) -> Attribute {
    Attribute::new(ENUM_ATTRIBUTE, declared)
}

///
/// FakeRecord
///

#[derive(Clone, Debug)]
pub(crate) struct FakeRecord {
    pub(crate) record_type: &'static str,
    pub(crate) id: u64,
    pub(crate) fields: BTreeMap<&'static str, Value>,
}

impl FakeRecord {
    pub(crate) fn ticket(id: u64, status: impl Into<Value>, priority: impl Into<Value>) -> Self {
        let fields = BTreeMap::from([
            ("id", Value::Int(i64::try_from(id).unwrap_or(i64::MAX))),
            ("title", Value::from("printer on fire")),
            ("status", status.into()),
            ("priority", priority.into()),
        ]);

        Self {
            record_type: TICKET,
            id,
            fields,
        }
    }

    pub(crate) fn invoice(id: u64) -> Self {
        Self {
            record_type: INVOICE,
            id,
            fields: BTreeMap::from([("total", Value::Int(100))]),
        }
    }

    pub(crate) fn get(&self, field: &str) -> &Value {
        &self.fields[field]
    }
}

///
/// FakeMetadata
///

pub(crate) struct FakeMetadata {
    record_type: &'static str,
    fields: Vec<(&'static str, Vec<Attribute>)>,
    types: TypeRegistry,
    read_only: Option<&'static str>,
    pub(crate) field_name_calls: Cell<usize>,
    pub(crate) descriptor_calls: Cell<usize>,
}

impl FakeMetadata {
    fn new(record_type: &'static str, fields: Vec<(&'static str, Vec<Attribute>)>) -> Self {
        Self {
            record_type,
            fields,
            types: test_types(),
            read_only: None,
            field_name_calls: Cell::new(0),
            descriptor_calls: Cell::new(0),
        }
    }

    /// `status` is declared relative to the record's namespace, `priority`
    /// fully qualified; `id` and `title` are plain fields.
    pub(crate) fn ticket() -> Self {
        Self::new(
            TICKET,
            vec![
                ("id", vec![]),
                ("title", vec![Attribute::new("column", "title")]),
                ("status", vec![enum_attr("Status")]),
                ("priority", vec![enum_attr("test_support::Priority")]),
            ],
        )
    }

    pub(crate) fn invoice() -> Self {
        Self::new(INVOICE, vec![("total", vec![enum_attr("Money")])])
    }

    pub(crate) fn with_annotation(record_type: &'static str, declared: &'static str) -> Self {
        Self::new(record_type, vec![("kind", vec![enum_attr(declared)])])
    }
}

impl RecordMetadata<FakeRecord> for FakeMetadata {
    fn record_type(&self) -> &str {
        self.record_type
    }

    fn field_names(&self) -> Vec<&str> {
        self.field_name_calls.set(self.field_name_calls.get() + 1);
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    fn field_descriptor(&self, field: &str) -> Result<FieldDescriptor<'_>, Error> {
        self.descriptor_calls.set(self.descriptor_calls.get() + 1);
        let (name, attributes) = self
            .fields
            .iter()
            .find(|(name, _)| *name == field)
            .ok_or_else(|| HostError::unknown_field(self.record_type, field))?;

        Ok(FieldDescriptor {
            record_type: self.record_type,
            name,
            attributes,
        })
    }

    fn field_value(&self, record: &FakeRecord, field: &str) -> Result<Value, Error> {
        record
            .fields
            .get(field)
            .cloned()
            .ok_or_else(|| HostError::unknown_field(self.record_type, field).into())
    }

    fn set_field_value(
        &self,
        record: &mut FakeRecord,
        field: &str,
        value: Value,
    ) -> Result<(), Error> {
        if self.read_only == Some(field) {
            return Err(HostError::new("read-only column").into());
        }
        let slot = record
            .fields
            .get_mut(field)
            .ok_or_else(|| HostError::unknown_field(self.record_type, field))?;
        *slot = value;

        Ok(())
    }

    fn resolve_type_name(&self, declared: &str) -> TypeRef {
        self.types.resolve(self.record_type, declared)
    }
}

///
/// CountingAnnotations
///

#[derive(Default)]
pub(crate) struct CountingAnnotations {
    pub(crate) calls: Cell<usize>,
}

impl AnnotationSource for CountingAnnotations {
    fn enum_annotation(&self, field: &FieldDescriptor<'_>) -> Option<EnumAnnotation> {
        self.calls.set(self.calls.get() + 1);
        AttributeAnnotations.enum_annotation(field)
    }
}

///
/// FakeSession
///

pub(crate) enum FakeEntry {
    Mapped(FakeMetadata),
    Foreign(&'static str),
}

pub(crate) struct FakeSession {
    entries: HashMap<&'static str, FakeEntry>,
    pub(crate) metadata_calls: Cell<usize>,
    pub(crate) originals: Vec<(RecordIdentity, String, Value)>,
}

impl FakeSession {
    pub(crate) fn new() -> Self {
        let entries = HashMap::from([
            (TICKET, FakeEntry::Mapped(FakeMetadata::ticket())),
            (INVOICE, FakeEntry::Mapped(FakeMetadata::invoice())),
        ]);

        Self {
            entries,
            metadata_calls: Cell::new(0),
            originals: Vec::new(),
        }
    }

    pub(crate) fn with_foreign(mut self, record_type: &'static str, kind: &'static str) -> Self {
        self.entries.insert(record_type, FakeEntry::Foreign(kind));
        self
    }

    /// Make the ticket's `field` reject writes.
    pub(crate) fn with_read_only_ticket_field(mut self, field: &'static str) -> Self {
        if let Some(FakeEntry::Mapped(metadata)) = self.entries.get_mut(TICKET) {
            metadata.read_only = Some(field);
        }
        self
    }

    pub(crate) fn ticket_metadata(&self) -> &FakeMetadata {
        match &self.entries[TICKET] {
            FakeEntry::Mapped(metadata) => metadata,
            FakeEntry::Foreign(_) => unreachable!("ticket metadata is always mapped"),
        }
    }

    /// Clean value registered for (record, field), latest write wins.
    pub(crate) fn original(&self, record: &FakeRecord, field: &str) -> Option<&Value> {
        self.originals
            .iter()
            .rev()
            .find(|(id, name, _)| *id == RecordIdentity(record.id) && name == field)
            .map(|(_, _, value)| value)
    }
}

impl MetadataSource for FakeSession {
    type Record = FakeRecord;

    fn metadata(&self, record_type: &str) -> Result<Metadata<'_, FakeRecord>, Error> {
        self.metadata_calls.set(self.metadata_calls.get() + 1);

        match self.entries.get(record_type) {
            Some(FakeEntry::Mapped(metadata)) => Ok(Metadata::Mapped(metadata)),
            Some(FakeEntry::Foreign(kind)) => Ok(Metadata::Unsupported { kind }),
            None => Err(HostError::unknown_record_type(record_type).into()),
        }
    }
}

impl ChangeTracker for Vec<(RecordIdentity, String, Value)> {
    fn set_original_value(&mut self, record: RecordIdentity, field: &str, value: Value) {
        self.push((record, field.to_string(), value));
    }
}

impl Session for FakeSession {
    fn record_type_of(&self, record: &FakeRecord) -> String {
        record.record_type.to_string()
    }

    fn record_identity(&self, record: &FakeRecord) -> RecordIdentity {
        RecordIdentity(record.id)
    }

    fn change_tracker(&mut self) -> &mut dyn ChangeTracker {
        &mut self.originals
    }
}
