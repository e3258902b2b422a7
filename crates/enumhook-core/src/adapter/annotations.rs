use crate::{
    ENUM_ATTRIBUTE,
    metadata::{AnnotationSource, EnumAnnotation, FieldDescriptor},
};

///
/// AttributeAnnotations
///
/// Reads enum declarations from the `enum_type` field attribute.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct AttributeAnnotations;

impl AnnotationSource for AttributeAnnotations {
    fn enum_annotation(&self, field: &FieldDescriptor<'_>) -> Option<EnumAnnotation> {
        field
            .attributes
            .iter()
            .find(|attr| attr.name == ENUM_ATTRIBUTE)
            .map(|attr| EnumAnnotation::new(attr.value))
    }
}

///
/// TESTS
///
