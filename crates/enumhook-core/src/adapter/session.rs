use crate::{
    adapter::{ModelMetadata, UnitOfWork},
    error::{Error, HostError},
    metadata::{ChangeTracker, Metadata, MetadataSource, RecordIdentity, Session},
    model::RecordModel,
    traits::{Entity, EntityKind},
    types::TypeRegistry,
};
use std::{collections::HashMap, ptr, sync::Arc};

///
/// MetadataEntry
///

enum MetadataEntry {
    Model(ModelMetadata),
    Foreign(String),
}

///
/// ModelSession
///
/// In-process mapping-layer session over derived entities.
///
/// Records are identified by address. A record must go through `hydrated`
/// when it is loaded and `detach` before it is dropped or moved; otherwise a
/// later record at the same address would be compared against stale originals.
///

pub struct ModelSession {
    types: Arc<TypeRegistry>,
    metadata: HashMap<&'static str, MetadataEntry>,
    unit_of_work: UnitOfWork,
}

impl ModelSession {
    #[must_use]
    pub fn new(types: TypeRegistry) -> Self {
        Self {
            types: Arc::new(types),
            metadata: HashMap::new(),
            unit_of_work: UnitOfWork::new(),
        }
    }

    #[must_use]
    pub fn with_entity<E: EntityKind>(mut self) -> Self {
        self.register_model(<E as EntityKind>::MODEL);
        self
    }

    pub fn register_model(&mut self, model: &'static RecordModel) {
        let metadata = ModelMetadata::new(model, Arc::clone(&self.types));
        self.metadata
            .insert(model.path, MetadataEntry::Model(metadata));
    }

    /// Register a record type whose metadata comes from an incompatible
    /// mapping implementation.
    pub fn register_foreign(&mut self, record_type: &'static str, kind: impl Into<String>) {
        self.metadata
            .insert(record_type, MetadataEntry::Foreign(kind.into()));
    }

    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    #[must_use]
    pub const fn unit_of_work(&self) -> &UnitOfWork {
        &self.unit_of_work
    }

    #[must_use]
    pub fn identity_of(record: &dyn Entity) -> RecordIdentity {
        RecordIdentity(ptr::from_ref(record).cast::<()>().addr() as u64)
    }

    /// Snapshot a freshly hydrated record as clean, before load listeners run.
    /// Replaces any snapshot left behind at the same address.
    pub fn hydrated(&mut self, record: &dyn Entity) {
        self.unit_of_work.snapshot(Self::identity_of(record), record);
    }

    /// Stop tracking a record before it is dropped or moved.
    pub fn detach(&mut self, record: &dyn Entity) {
        self.unit_of_work.detach(Self::identity_of(record));
    }
}

impl MetadataSource for ModelSession {
    type Record = dyn Entity;

    fn metadata(&self, record_type: &str) -> Result<Metadata<'_, dyn Entity>, Error> {
        match self.metadata.get(record_type) {
            Some(MetadataEntry::Model(metadata)) => Ok(Metadata::Mapped(metadata)),
            Some(MetadataEntry::Foreign(kind)) => Ok(Metadata::Unsupported { kind }),
            None => Err(HostError::unknown_record_type(record_type).into()),
        }
    }
}

impl Session for ModelSession {
    fn record_type_of(&self, record: &(dyn Entity + 'static)) -> String {
        record.model().path.to_string()
    }

    fn record_identity(&self, record: &(dyn Entity + 'static)) -> RecordIdentity {
        Self::identity_of(record)
    }

    fn change_tracker(&mut self) -> &mut dyn ChangeTracker {
        &mut self.unit_of_work
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapter::AttributeAnnotations, listener::EnumLoadListener, metadata::LoadEvent,
        traits::Path, value::Value,
    };
    use enumhook_derive::{Entity, EnumKind};

    #[derive(Clone, Copy, Debug, EnumKind, Eq, PartialEq)]
    #[enum_kind(path = "desk::Status")]
    enum Status {
        #[value = "A"]
        Active,
        #[value = "C"]
        Closed,
    }

    #[derive(Debug, Default, Entity)]
    #[entity(path = "desk::Ticket")]
    struct Ticket {
        title: Value,
        #[field(enum_type = "Status")]
        status: Value,
    }

    #[derive(Debug, Default, Entity)]
    #[entity(path = "desk::Note")]
    struct Note {
        body: Value,
    }

    fn session() -> ModelSession {
        ModelSession::new(TypeRegistry::new().with_enum::<Status>())
            .with_entity::<Ticket>()
            .with_entity::<Note>()
    }

    #[test]
    fn hydrated_record_starts_clean() {
        let mut session = session();
        let ticket = Ticket {
            title: Value::from("jammed"),
            status: Value::from("C"),
        };

        session.hydrated(&ticket);
        let identity = ModelSession::identity_of(&ticket);

        assert_eq!(session.unit_of_work().tracked_records(), 1);
        assert!(session.unit_of_work().dirty_fields(identity, &ticket).is_empty());
    }

    #[test]
    fn load_replaces_snapshot_with_member() {
        let listener = EnumLoadListener::new(AttributeAnnotations);
        let mut session = session();
        let mut ticket = Ticket {
            title: Value::from("jammed"),
            status: Value::from("C"),
        };

        session.hydrated(&ticket);
        listener
            .on_load(LoadEvent::<ModelSession>::new(&mut ticket, &mut session))
            .unwrap();

        let identity = ModelSession::identity_of(&ticket);
        let original = session.unit_of_work().original_value(identity, "status");
        assert_eq!(original, Some(&Value::from(Status::Closed)));
        assert_eq!(
            session.unit_of_work().original_value(identity, "title"),
            Some(&Value::from("jammed"))
        );

        session.detach(&ticket);
        assert_eq!(session.unit_of_work().tracked_records(), 0);
    }

    #[test]
    fn hydrating_again_replaces_stale_originals() {
        let listener = EnumLoadListener::new(AttributeAnnotations);
        let mut session = session();
        let mut ticket = Ticket {
            title: Value::from("jammed"),
            status: Value::from("C"),
        };

        session.hydrated(&ticket);
        listener
            .on_load(LoadEvent::<ModelSession>::new(&mut ticket, &mut session))
            .unwrap();

        // a different record reusing the same slot
        ticket = Ticket {
            title: Value::from("new toner"),
            status: Value::Null,
        };
        session.hydrated(&ticket);

        let identity = ModelSession::identity_of(&ticket);
        assert_eq!(
            session.unit_of_work().original_value(identity, "status"),
            Some(&Value::Null)
        );
        assert!(session.unit_of_work().dirty_fields(identity, &ticket).is_empty());
        assert_eq!(session.unit_of_work().tracked_records(), 1);
    }

    #[test]
    fn record_without_enum_fields_is_untouched() {
        let listener = EnumLoadListener::new(AttributeAnnotations);
        let mut session = session();
        let mut note = Note {
            body: Value::from("A"),
        };

        listener
            .on_load(LoadEvent::<ModelSession>::new(&mut note, &mut session))
            .unwrap();

        assert_eq!(note.body, Value::from("A"));
        assert_eq!(session.unit_of_work().tracked_records(), 0);
    }

    #[test]
    fn metadata_rejects_records_of_another_type() {
        let session = session();
        let note = Note::default();

        let Ok(Metadata::Mapped(metadata)) = session.metadata(Ticket::PATH) else {
            panic!("ticket metadata should be mapped");
        };

        assert!(matches!(metadata.field_value(&note, "status"), Err(Error::Host(_))));
        assert!(matches!(
            metadata.field_descriptor("missing"),
            Err(Error::Host(_))
        ));
    }
}
