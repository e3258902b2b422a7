//! Derive macros for enumhook.
//!
//! - `#[derive(EnumKind)]` turns a fieldless enum into a static member
//!   registry (`EnumModel`) plus the typed `EnumKind` view over it. Each
//!   variant names its scalar with `#[value = "A"]`, `#[value = 1]`, or the
//!   list form `#[value(-1)]` that negative integers need.
//! - `#[derive(Entity)]` builds the static `RecordModel` of a record struct and
//!   its dynamic field accessors.
//!
//! Generated code refers to `::enumhook`, so these derives are meant to be used
//! through the facade crate.

use proc_macro::TokenStream;

mod entity;
mod enum_kind;
mod util;

#[proc_macro_derive(EnumKind, attributes(enum_kind, value))]
pub fn derive_enum_kind(input: TokenStream) -> TokenStream {
    enum_kind::derive_enum_kind(input.into()).into()
}

#[proc_macro_derive(Entity, attributes(entity, field))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity(input.into()).into()
}
