use crate::enums::EnumRef;
use derive_more::Display;
use serde::Serialize;

///
/// Scalar
///
/// Owned lookup key for enum resolution.
/// Int and Text never compare equal to each other, even when they print the same.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Scalar {
    #[display("{_0}")]
    Int(i64),
    #[display("\"{_0}\"")]
    Text(String),
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<MemberValue> for Scalar {
    fn from(value: MemberValue) -> Self {
        match value {
            MemberValue::Int(v) => Self::Int(v),
            MemberValue::Text(v) => Self::Text(v.to_string()),
        }
    }
}

///
/// MemberValue
///
/// Static scalar backing one enum member.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum MemberValue {
    #[display("{_0}")]
    Int(i64),
    #[display("\"{_0}\"")]
    Text(&'static str),
}

impl MemberValue {
    /// Return whether this member value is the given lookup key.
    #[must_use]
    pub fn matches(self, scalar: &Scalar) -> bool {
        match (self, scalar) {
            (Self::Int(a), Scalar::Int(b)) => a == *b,
            (Self::Text(a), Scalar::Text(b)) => a == b,
            _ => false,
        }
    }
}

///
/// Value
///
/// Dynamic field value exchanged with the host mapping layer.
/// `Null` is the unset sentinel; `Enum` is a materialized member.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Text(String),
    Enum(EnumRef),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Return the materialized enum member, if any.
    #[must_use]
    pub const fn as_enum(&self) -> Option<EnumRef> {
        match self {
            Self::Enum(e) => Some(*e),
            _ => None,
        }
    }

    /// Return the scalar key this value resolves through.
    /// Enum values yield their member's scalar; `Null` yields nothing.
    #[must_use]
    pub fn scalar_key(&self) -> Option<Scalar> {
        match self {
            Self::Null => None,
            Self::Int(v) => Some(Scalar::Int(*v)),
            Self::Text(v) => Some(Scalar::Text(v.clone())),
            Self::Enum(e) => Some(e.value().into()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<EnumRef> for Value {
    fn from(value: EnumRef) -> Self {
        Self::Enum(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

///
/// TESTS
///
