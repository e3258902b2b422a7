//! Model-backed host adapters.
//!
//! A reference implementation of every host contract, built on the static
//! models that `#[derive(Entity)]` and `#[derive(EnumKind)]` generate. Hosts
//! with their own mapping layer implement the `metadata` traits instead.

mod annotations;
mod record;
mod session;
mod unit_of_work;

pub use annotations::AttributeAnnotations;
pub use record::ModelMetadata;
pub use session::ModelSession;
pub use unit_of_work::UnitOfWork;
