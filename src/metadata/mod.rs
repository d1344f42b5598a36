//! Read-only views over a module's type metadata.
//!
//! Everything the stripping engine consumes lives here: the owning
//! [`module::Module`], the [`typesystem`] graph of [`typesystem::TypeDef`]
//! views, the [`member`] categories, the [`access`] lattice the visibility
//! computations run on, and the [`markers`] derived from custom attributes.
//!
//! The graph is populated once per module load (by a host adapter or the
//! [`typesystem::TypeBuilder`] API) and never mutated by the engine.

pub mod access;
pub mod markers;
pub mod member;
pub mod module;
pub mod token;
pub mod typesystem;
