//! Load-time coercion of raw field values into enum members.

use crate::{
    enums::{EnumModel, EnumRef},
    error::InvalidValueError,
    value::Value,
};

/// Resolve one raw field value against its declared enum.
///
/// `Null` yields `None` and performs no lookup. An already-materialized
/// member is looked up again through its scalar, so running the load hook
/// twice is a no-op rather than an error.
pub fn materialize_value(
    raw: &Value,
    enum_type: &'static EnumModel,
) -> Result<Option<EnumRef>, InvalidValueError> {
    let Some(key) = raw.scalar_key() else {
        return Ok(None);
    };

    enum_type.lookup(&key).map(Some)
}

///
/// TESTS
///
