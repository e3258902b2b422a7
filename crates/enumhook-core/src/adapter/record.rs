use crate::{
    error::{Error, HostError},
    metadata::{FieldDescriptor, RecordMetadata},
    model::RecordModel,
    traits::Entity,
    types::{TypeRef, TypeRegistry},
    value::Value,
};
use std::sync::Arc;

///
/// ModelMetadata
///
/// Record metadata backed by a static `RecordModel`.
/// Type names resolve through the shared `TypeRegistry`, relative to the
/// model's own namespace.
///

#[derive(Clone, Debug)]
pub struct ModelMetadata {
    model: &'static RecordModel,
    types: Arc<TypeRegistry>,
}

impl ModelMetadata {
    #[must_use]
    pub const fn new(model: &'static RecordModel, types: Arc<TypeRegistry>) -> Self {
        Self { model, types }
    }

    #[must_use]
    pub const fn model(&self) -> &'static RecordModel {
        self.model
    }

    fn check_record(&self, record: &dyn Entity) -> Result<(), HostError> {
        let found = record.model().path;
        if found == self.model.path {
            Ok(())
        } else {
            Err(HostError::record_mismatch(self.model.path, found))
        }
    }

    fn unknown_field(&self, field: &str) -> Error {
        HostError::unknown_field(self.model.path, field).into()
    }
}

impl RecordMetadata<dyn Entity> for ModelMetadata {
    fn record_type(&self) -> &str {
        self.model.path
    }

    fn field_names(&self) -> Vec<&str> {
        self.model.field_names().collect()
    }

    fn field_descriptor(&self, field: &str) -> Result<FieldDescriptor<'_>, Error> {
        let model = self.model.field(field).ok_or_else(|| self.unknown_field(field))?;

        Ok(FieldDescriptor {
            record_type: self.model.path,
            name: model.name,
            attributes: model.attributes,
        })
    }

    fn field_value(&self, record: &(dyn Entity + 'static), field: &str) -> Result<Value, Error> {
        self.check_record(record)?;

        record
            .field(field)
            .cloned()
            .ok_or_else(|| self.unknown_field(field))
    }

    fn set_field_value(
        &self,
        record: &mut (dyn Entity + 'static),
        field: &str,
        value: Value,
    ) -> Result<(), Error> {
        self.check_record(record)?;

        let slot = record
            .field_mut(field)
            .ok_or_else(|| self.unknown_field(field))?;
        *slot = value;

        Ok(())
    }

    fn resolve_type_name(&self, declared: &str) -> TypeRef {
        self.types.resolve(self.model.path, declared)
    }
}
