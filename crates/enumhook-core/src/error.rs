use crate::value::Scalar;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error surfaced to the host's event dispatch.
/// Every variant aborts the current resolution or load; nothing is retried.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    InvalidValue(#[from] InvalidValueError),

    #[error(transparent)]
    NotAnEnum(#[from] NotAnEnumError),

    #[error(transparent)]
    UnsupportedMetadata(#[from] UnsupportedMetadataError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Host(_) => ErrorClass::Host,
            Self::InvalidValue(_) => ErrorClass::DataIntegrity,
            Self::NotAnEnum(_) => ErrorClass::Configuration,
            Self::UnsupportedMetadata(_) => ErrorClass::Unsupported,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {}", self.class(), self)
    }
}

///
/// NotAnEnumError
///
/// A field was annotated as enum-typed but the declared type is not an enum.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("'{type_name}' is not an enum type")]
pub struct NotAnEnumError {
    pub type_name: String,
}

impl NotAnEnumError {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

///
/// InvalidValueError
///
/// A stored scalar does not name any member of its declared enum.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{value} is not a valid value of enum '{enum_type}'")]
pub struct InvalidValueError {
    pub enum_type: &'static str,
    pub value: Scalar,
}

impl InvalidValueError {
    #[must_use]
    pub const fn new(enum_type: &'static str, value: Scalar) -> Self {
        Self { enum_type, value }
    }
}

///
/// UnsupportedMetadataError
///
/// The mapping layer returned metadata of a shape this crate cannot read.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unsupported record metadata '{kind}'")]
pub struct UnsupportedMetadataError {
    pub kind: String,
}

impl UnsupportedMetadataError {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

///
/// HostError
///
/// A host collaborator failed to honour its contract
/// (unknown record type, unknown field, rejected write).
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn unknown_record_type(record_type: &str) -> Self {
        Self::new(format!("no metadata for record type '{record_type}'"))
    }

    pub fn unknown_field(record_type: &str, field: &str) -> Self {
        Self::new(format!("record type '{record_type}' has no field '{field}'"))
    }

    pub fn record_mismatch(expected: &str, found: &str) -> Self {
        Self::new(format!(
            "metadata for '{expected}' cannot access a record of type '{found}'"
        ))
    }
}

///
/// ErrorClass
/// Error taxonomy for host-side classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    DataIntegrity,
    Host,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::DataIntegrity => "data_integrity",
            Self::Host => "host",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_follows_variant() {
        let err: Error = NotAnEnumError::new("app::Money").into();
        assert_eq!(err.class(), ErrorClass::Configuration);
        assert_eq!(
            err.display_with_class(),
            "configuration: 'app::Money' is not an enum type"
        );

        let err: Error = InvalidValueError::new("app::Status", Scalar::from("X")).into();
        assert_eq!(err.class(), ErrorClass::DataIntegrity);
        assert_eq!(
            err.to_string(),
            "\"X\" is not a valid value of enum 'app::Status'"
        );

        let err: Error = UnsupportedMetadataError::new("odm").into();
        assert_eq!(err.class(), ErrorClass::Unsupported);
    }
}
