use crate::{
    enums::{EnumModel, EnumRef},
    error::InvalidValueError,
    model::RecordModel,
    value::{MemberValue, Scalar, Value},
};
use std::any::Any;

///
/// Path
/// Fully-qualified type path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EnumKind
///
/// Typed view over a static enum registry.
/// `from_index` and `index` must agree with the order of `MODEL.members`.
///

pub trait EnumKind: Path + Copy + Sized + 'static {
    const MODEL: &'static EnumModel;

    fn from_index(index: usize) -> Option<Self>;

    fn index(self) -> usize;

    /// Resolve a scalar to the matching variant.
    fn lookup(scalar: &Scalar) -> Result<Self, InvalidValueError> {
        let found = Self::MODEL.lookup(scalar)?;

        Self::from_index(found.index())
            .ok_or_else(|| InvalidValueError::new(Self::PATH, scalar.clone()))
    }

    fn value(self) -> MemberValue {
        Self::MODEL.members[self.index()].value
    }

    fn to_enum_ref(self) -> EnumRef {
        // index always comes from MODEL.members
        Self::MODEL
            .member(self.index())
            .unwrap_or_else(|| unreachable!("variant index outside '{}'", Self::PATH))
    }

    /// Convert a materialized member back into the typed variant.
    fn try_from_enum_ref(value: EnumRef) -> Option<Self> {
        if value.is_of(Self::MODEL) {
            Self::from_index(value.index())
        } else {
            None
        }
    }

    /// Convert a field value into the typed variant, if it holds one of ours.
    fn try_from_value(value: &Value) -> Option<Self> {
        value.as_enum().and_then(Self::try_from_enum_ref)
    }
}

///
/// Entity
///
/// A record with a static model and dynamic access to its mapped fields.
/// Object-safe so hosts can hold heterogeneous records as `dyn Entity`.
///

pub trait Entity: Any {
    fn model(&self) -> &'static RecordModel;

    fn field(&self, name: &str) -> Option<&Value>;

    fn field_mut(&mut self, name: &str) -> Option<&mut Value>;
}

///
/// EntityKind
/// Type-level access to an entity's model.
///

pub trait EntityKind: Entity + Path {
    const MODEL: &'static RecordModel;
}
