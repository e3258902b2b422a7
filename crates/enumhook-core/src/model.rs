//! Static record models.
//!
//! `RecordModel` is the declarative shape of one record type: its path and the
//! ordered list of mapped fields, each with the raw attributes it was declared
//! with. Models are generated by `#[derive(Entity)]`; hosts with their own
//! reflection layer implement the metadata traits directly instead.

///
/// RecordModel
///

#[derive(Debug)]
pub struct RecordModel {
    /// Fully-qualified type path; also the cache key for this record type.
    pub path: &'static str,
    /// Ordered mapped fields.
    pub fields: &'static [FieldModel],
}

impl RecordModel {
    #[must_use]
    pub const fn new(path: &'static str, fields: &'static [FieldModel]) -> Self {
        Self { path, fields }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|field| field.name)
    }
}

///
/// FieldModel
///

#[derive(Debug)]
pub struct FieldModel {
    pub name: &'static str,
    pub attributes: &'static [Attribute],
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, attributes: &'static [Attribute]) -> Self {
        Self { name, attributes }
    }

    /// Return the value of the first attribute called `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'static str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value)
    }
}

///
/// Attribute
/// Raw declarative metadata attached to a field.
///

#[derive(Debug)]
pub struct Attribute {
    pub name: &'static str,
    pub value: &'static str,
}

impl Attribute {
    #[must_use]
    pub const fn new(name: &'static str, value: &'static str) -> Self {
        Self { name, value }
    }
}
