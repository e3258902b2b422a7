//! Type handles and namespace-relative type-name resolution.

use crate::{
    PATH_SEPARATOR,
    enums::EnumModel,
    traits::{EnumKind, Path},
};
use std::collections::HashMap;

///
/// TypeRef
///
/// Opaque handle to a resolved type.
/// Only `Enum` handles are usable as enum field targets.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeRef {
    Enum(&'static EnumModel),
    Other(String),
}

impl TypeRef {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Enum(model) => model.path,
            Self::Other(path) => path,
        }
    }

    #[must_use]
    pub const fn as_enum(&self) -> Option<&'static EnumModel> {
        match self {
            Self::Enum(model) => Some(*model),
            Self::Other(_) => None,
        }
    }
}

/// Return the namespace part of a type path (`a::b::C` → `a::b`).
#[must_use]
pub fn namespace_of(path: &str) -> Option<&str> {
    path.rsplit_once(PATH_SEPARATOR).map(|(ns, _)| ns)
}

/// Qualify a declared type name against the namespace of `context`.
///
/// Names that already contain a separator are taken as qualified; a leading
/// separator is stripped. Bare names are placed in the context's namespace.
#[must_use]
pub fn qualify(context: &str, declared: &str) -> String {
    if let Some(absolute) = declared.strip_prefix(PATH_SEPARATOR) {
        return absolute.to_string();
    }
    if declared.contains(PATH_SEPARATOR) {
        return declared.to_string();
    }

    match namespace_of(context) {
        Some(ns) => format!("{ns}{PATH_SEPARATOR}{declared}"),
        None => declared.to_string(),
    }
}

///
/// TypeEntry
///

#[derive(Clone, Copy, Debug)]
enum TypeEntry {
    Enum(&'static EnumModel),
    Other,
}

///
/// TypeRegistry
///
/// Known type paths for a host. Unknown paths resolve to `TypeRef::Other`,
/// which the enum-field resolver rejects like any other non-enum type.
///

#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeEntry>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a derived enum type.
    #[must_use]
    pub fn with_enum<E: EnumKind>(mut self) -> Self {
        self.register_enum_model(E::MODEL);
        self
    }

    /// Register a non-enum type, e.g. a value object that may be mis-annotated.
    #[must_use]
    pub fn with_other<T: Path>(mut self) -> Self {
        self.register_other(T::PATH);
        self
    }

    pub fn register_enum_model(&mut self, model: &'static EnumModel) {
        self.types
            .insert(model.path.to_string(), TypeEntry::Enum(model));
    }

    pub fn register_other(&mut self, path: &str) {
        self.types.insert(path.to_string(), TypeEntry::Other);
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.types.contains_key(path)
    }

    /// Look up a fully-qualified path.
    #[must_use]
    pub fn get(&self, path: &str) -> TypeRef {
        match self.types.get(path).copied() {
            Some(TypeEntry::Enum(model)) => TypeRef::Enum(model),
            Some(TypeEntry::Other) | None => TypeRef::Other(path.to_string()),
        }
    }

    /// Qualify `declared` against `context` and look the result up.
    #[must_use]
    pub fn resolve(&self, context: &str, declared: &str) -> TypeRef {
        self.get(&qualify(context, declared))
    }
}

///
/// TESTS
///
