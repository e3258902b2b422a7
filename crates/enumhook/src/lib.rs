//! ## Crate layout
//! - `enums`, `value`, `traits`: enum registries, dynamic field values and the
//!   typed views generated by the derives.
//! - `cache`, `resolve`, `materialize`, `listener`: the enum-field cache and the
//!   post-load listener that materializes enum fields.
//! - `metadata`: contracts the host mapping layer implements.
//! - `adapter`, `model`, `types`: a ready-made host built on derived models.
//! - `config`, `error`, `obs`: configuration, error taxonomy and metrics.
//!
//! The derive macros are re-exported at the crate root; generated code refers to
//! `::enumhook`, so depend on this crate rather than on the internal ones.

pub use enumhook_core::{
    ENUM_ATTRIBUTE, PATH_SEPARATOR, adapter, cache, config, enums, error, listener, materialize,
    metadata, model, obs, resolve, traits, types, value,
};
pub use enumhook_derive::{Entity, EnumKind};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Types
//

pub use enumhook_core::{error::Error, listener::EnumLoadListener};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        Entity, EnumKind,
        adapter::{AttributeAnnotations, ModelSession},
        enums::{EnumModel, EnumRef},
        listener::EnumLoadListener,
        metadata::LoadEvent,
        traits::{Entity as _, EntityKind as _, EnumKind as _, Path as _},
        value::{MemberValue, Scalar, Value},
    };
}
