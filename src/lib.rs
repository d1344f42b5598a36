#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]

//! # dotstrip
//!
//! Reconstructs compilable, declaration-only C# source text from the metadata
//! of a loaded .NET module, discarding all executable bodies. The generated
//! sources keep the exact API shape of the original binary - names, generics,
//! nesting, inheritance, visibility, operator/indexer/delegate syntax - so
//! that dependent modules can be recompiled against them as a drop-in
//! substitute for the original assembly.
//!
//! ## Features
//!
//! - **Exact declaration grammar** - generic nesting (`Outer<T>.Inner<U>`),
//!   explicit interface implementations, operator overloads, indexers,
//!   delegates, enums and finalizers are all reproduced
//! - **Derived visibility** - the effective access modifier of an override
//!   and the minimal safe visibility of a member are recomputed from the
//!   six-level access lattice, not read from a single metadata flag
//! - **Inert stub bodies** - every surviving method body only assigns `out`
//!   parameters and returns `default(T)`
//! - **Deterministic output** - a strict depth-first walk over an immutable
//!   metadata graph; running twice yields byte-identical files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotstrip::prelude::*;
//! use std::sync::Arc;
//!
//! # fn load() -> Module { Module::new("Game") }
//! let module: Module = load(); // populated by a host metadata adapter
//! let options = StripOptions::new("/tmp/stripped");
//! let progress = Arc::new(StripProgress::new());
//!
//! ModuleWalker::new(&module, &options, progress.clone()).run()?;
//! println!("{} component types", progress.components().count());
//! # Ok::<(), dotstrip::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - read-only views over a module's type metadata: the
//!   [`metadata::typesystem`] graph, member representations, the access
//!   lattice and the fluent builder API hosts use to populate a [`metadata::module::Module`]
//! - [`strip`] - the reconstruction engine: signature builder, member
//!   classifier, per-type stripper and the module walker
//! - [`Error`] and [`Result`] - crate-wide error handling
//!
//! The engine is single-threaded and synchronous. Hosts that want to run it
//! on a worker thread poll the [`strip::progress::StripProgress`] side channels from
//! elsewhere; the channels are safe to read without additional locking.

#[macro_use]
pub(crate) mod error;

pub mod metadata;
pub mod prelude;
pub mod strip;

/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `dotstrip` Error type
///
/// The main error type for all operations in this crate. The variants follow
/// the input / I-O / configuration fault taxonomy of the stripping engine.
pub use error::Error;
