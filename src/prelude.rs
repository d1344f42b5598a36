//! # dotstrip Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! from the dotstrip library. Import this module to get quick access to the
//! essential types for building a module view and stripping it to source.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotstrip operations
pub use crate::Error;

/// The result type used throughout dotstrip
pub use crate::Result;

// ================================================================================================
// Metadata System
// ================================================================================================

/// Metadata token type identifying graph entries
pub use crate::metadata::token::Token;

/// The owning module view
pub use crate::metadata::module::Module;

/// The access lattice used for emitted visibility
pub use crate::metadata::access::AccessLevel;

/// Custom-attribute derived member and type tags
pub use crate::metadata::markers::MarkerFlags;

/// Member views and their attribute flag groups
pub use crate::metadata::member::{
    Constructor, ConstructorRc, Field, FieldAttributes, FieldRc, Member, Method,
    MethodAccessFlags, MethodModifiers, MethodRc, Param, Property, PropertyRc,
};

/// Core type system components
pub use crate::metadata::typesystem::{
    MethodBuilder, PrimitiveKind, TypeAttributes, TypeBuilder, TypeDef, TypeFlavor, TypeKind,
    TypeLink, TypeRc,
};

// ================================================================================================
// Stripping Engine
// ================================================================================================

/// Run configuration
pub use crate::strip::StripOptions;

/// Shared progress observation channel
pub use crate::strip::progress::StripProgress;

/// Per-type emission
pub use crate::strip::stripper::TypeStripper;

/// Whole-module driver
pub use crate::strip::walker::ModuleWalker;
