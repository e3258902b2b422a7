//! Core runtime for enumhook: enum registries, the enum-field cache, the
//! load listener that materializes enum fields, and the host contracts it
//! talks to.
#![warn(unreachable_pub)]

extern crate self as enumhook;

// public exports are one module level down
pub mod adapter;
pub mod cache;
pub mod config;
pub mod enums;
pub mod error;
pub mod listener;
pub mod materialize;
pub mod metadata;
pub mod model;
pub mod obs;
pub mod resolve;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Attribute name the default annotation source reads enum declarations from.
pub const ENUM_ATTRIBUTE: &str = "enum_type";

/// Separator between namespace segments in type paths.
pub const PATH_SEPARATOR: &str = "::";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, caches, or adapters are re-exported here.
///

pub mod prelude {
    pub use crate::{
        enums::{EnumMember, EnumModel, EnumRef},
        traits::{EnumKind, Path},
        value::{MemberValue, Scalar, Value},
    };
}
