//! Closed enum value sets and their canonical member handles.
//!
//! An `EnumModel` is a `'static` registry of members. Every lookup of the same
//! scalar returns the same `EnumRef`, so members behave as per-process
//! singletons without any runtime allocation.

use crate::{
    error::InvalidValueError,
    value::{MemberValue, Scalar},
};
use std::{fmt, hash};
use thiserror::Error as ThisError;

///
/// EnumMember
///

#[derive(Debug)]
pub struct EnumMember {
    /// Variant name, used for diagnostics only.
    pub name: &'static str,
    /// Scalar that identifies the member in storage.
    pub value: MemberValue,
}

impl EnumMember {
    #[must_use]
    pub const fn new(name: &'static str, value: MemberValue) -> Self {
        Self { name, value }
    }
}

///
/// EnumModel
/// Static member registry for one enum type.
///

#[derive(Debug)]
pub struct EnumModel {
    /// Fully-qualified type path (the enum type identifier).
    pub path: &'static str,
    /// Members in declaration order.
    pub members: &'static [EnumMember],
}

impl EnumModel {
    #[must_use]
    pub const fn new(path: &'static str, members: &'static [EnumMember]) -> Self {
        Self { path, members }
    }

    /// Resolve a scalar to the unique member that carries it.
    pub fn lookup(&'static self, scalar: &Scalar) -> Result<EnumRef, InvalidValueError> {
        self.members
            .iter()
            .position(|member| member.value.matches(scalar))
            .map(|index| EnumRef { model: self, index })
            .ok_or_else(|| InvalidValueError::new(self.path, scalar.clone()))
    }

    /// Return the member at `index`, if it exists.
    #[must_use]
    pub fn member(&'static self, index: usize) -> Option<EnumRef> {
        (index < self.members.len()).then_some(EnumRef { model: self, index })
    }

    /// Iterate all members in declaration order.
    pub fn iter(&'static self) -> impl Iterator<Item = EnumRef> {
        (0..self.members.len()).map(move |index| EnumRef { model: self, index })
    }

    /// Check that no two members share a scalar.
    /// Derived models are checked at compile time; this covers hand-written ones.
    pub fn validate(&self) -> Result<(), EnumModelError> {
        for (i, member) in self.members.iter().enumerate() {
            if member.name.is_empty() {
                return Err(EnumModelError::EmptyName { index: i });
            }

            if let Some(dup) = self.members[..i].iter().find(|m| m.value == member.value) {
                return Err(EnumModelError::DuplicateValue {
                    path: self.path,
                    value: member.value,
                    first: dup.name,
                    second: member.name,
                });
            }
        }

        Ok(())
    }
}

impl PartialEq for EnumModel {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for EnumModel {}

///
/// EnumModelError
///

#[derive(Debug, ThisError)]
pub enum EnumModelError {
    #[error("enum '{path}' assigns {value} to both '{first}' and '{second}'")]
    DuplicateValue {
        path: &'static str,
        value: MemberValue,
        first: &'static str,
        second: &'static str,
    },

    #[error("enum member at index {index} has an empty name")]
    EmptyName { index: usize },
}

///
/// EnumRef
///
/// Canonical handle to one member of one enum type.
/// Equality is by (enum path, member scalar).
///

#[derive(Clone, Copy)]
pub struct EnumRef {
    model: &'static EnumModel,
    index: usize,
}

impl EnumRef {
    #[must_use]
    pub const fn model(self) -> &'static EnumModel {
        self.model
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        self.model.path
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.model.members[self.index].name
    }

    /// The scalar this member is stored as.
    #[must_use]
    pub const fn value(self) -> MemberValue {
        self.model.members[self.index].value
    }

    /// Return whether this member belongs to `model`.
    #[must_use]
    pub fn is_of(self, model: &EnumModel) -> bool {
        self.model.path == model.path
    }
}

impl PartialEq for EnumRef {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path() && self.value() == other.value()
    }
}

impl Eq for EnumRef {}

impl hash::Hash for EnumRef {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.path().hash(state);
        self.value().hash(state);
    }
}

impl fmt::Debug for EnumRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}({})", self.path(), self.name(), self.value())
    }
}

impl fmt::Display for EnumRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.path(), self.name())
    }
}

///
/// TESTS
///
