//! Enum field discovery for one record type.

use crate::{
    cache::EnumFieldMap,
    error::{Error, NotAnEnumError, UnsupportedMetadataError},
    metadata::{AnnotationSource, Metadata, RecordMetadata},
    types::TypeRef,
};

/// Unwrap host metadata, rejecting shapes this crate cannot read.
pub fn mapped<'a, R: ?Sized>(
    metadata: Metadata<'a, R>,
) -> Result<&'a dyn RecordMetadata<R>, UnsupportedMetadataError> {
    match metadata {
        Metadata::Mapped(inner) => Ok(inner),
        Metadata::Unsupported { kind } => Err(UnsupportedMetadataError::new(kind)),
    }
}

/// Inspect every mapped field of a record type and collect the enum-typed ones.
///
/// The first annotation that resolves to a non-enum type aborts the whole
/// resolution; nothing partial is returned.
pub fn resolve_enum_fields<R: ?Sized>(
    metadata: &dyn RecordMetadata<R>,
    annotations: &dyn AnnotationSource,
) -> Result<EnumFieldMap, Error> {
    let mut map = EnumFieldMap::new();

    for field in metadata.field_names() {
        let descriptor = metadata.field_descriptor(field)?;
        let Some(annotation) = annotations.enum_annotation(&descriptor) else {
            continue;
        };

        match metadata.resolve_type_name(&annotation.class) {
            TypeRef::Enum(model) => {
                tracing::trace!(
                    record_type = metadata.record_type(),
                    field,
                    enum_type = model.path,
                    "enum field discovered"
                );
                map.insert(field, model);
            }
            TypeRef::Other(path) => return Err(NotAnEnumError::new(path).into()),
        }
    }

    Ok(map)
}

///
/// TESTS
///
