//! Read-only type graph over a module's metadata.
//!
//! This module provides the type views the stripping engine walks:
//!
//! - [`TypeDef`]: one declared, referenced or synthetic type
//! - [`TypeLink`]: weak smart reference between types, preventing cycles
//! - [`TypeKind`] / [`TypeFlavor`]: declaration category and shape
//! - [`TypeAttributes`]: raw flag constants for the visibility lattice
//! - [`PrimitiveKind`]: the built-in runtime primitives with C# aliases
//! - [`TypeBuilder`]: fluent construction API for host adapters and tests
//!
//! The graph is produced once per module load and is immutable for the
//! duration of a stripping run. Strong ownership of every [`TypeDef`] lives
//! in the owning [`crate::metadata::module::Module`]; all edges between
//! types (base, declaring, interfaces, nesting, generic arguments) are weak
//! [`TypeLink`]s, so dropping the module releases the whole graph.

mod attributes;
mod builder;
mod primitives;

pub use attributes::TypeAttributes;
pub use builder::{MethodBuilder, TypeBuilder};
pub use primitives::PrimitiveKind;

use std::sync::{Arc, OnceLock, Weak};

use crate::{
    metadata::{markers::MarkerFlags, member::MemberList, token::Token},
    Result,
};

/// Depth cap for base-type-chain walks. Well-formed metadata never cycles,
/// but a bounded loop keeps malformed input from hanging the engine.
pub const MAX_INHERITANCE_DEPTH: usize = 256;

/// Strong reference to a [`TypeDef`]
pub type TypeRc = Arc<TypeDef>;
/// A vector of weak type links, shared and append-only
pub type TypeLinkList = Arc<boxcar::Vec<TypeLink>>;

/// A weak smart reference to a [`TypeDef`].
///
/// Every type-to-type edge in the graph uses a `TypeLink` so that mutually
/// referencing types (base/derived, enclosing/nested) cannot keep each other
/// alive. Links are expected to stay resolvable while the owning module
/// lives; a dead link observed during a run is an input fault.
#[derive(Clone, Debug)]
pub struct TypeLink {
    weak_ref: Weak<TypeDef>,
}

impl TypeLink {
    /// Create a new link from a strong reference
    #[must_use]
    pub fn new(strong_ref: &TypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning `None` if it was dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<TypeRc> {
        self.weak_ref.upgrade()
    }

    /// Get a strong reference to the type, failing with an input fault if the
    /// owning module no longer holds it.
    pub fn resolve(&self) -> Result<TypeRc> {
        self.weak_ref
            .upgrade()
            .ok_or_else(|| malformed_error!("Type link target is no longer alive"))
    }

    /// Check whether the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Token of the referenced type (if still alive)
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.upgrade().map(|t| t.token)
    }
}

impl From<TypeRc> for TypeLink {
    fn from(strong_ref: TypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

impl From<&TypeRc> for TypeLink {
    fn from(strong_ref: &TypeRc) -> Self {
        Self::new(strong_ref)
    }
}

/// Declaration category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Reference type declared with `class`
    Class,
    /// Value type declared with `struct`
    Struct,
    /// Contract declared with `interface`
    Interface,
    /// Named constant set declared with `enum`
    Enum,
    /// Multicast delegate type declared with `delegate`
    Delegate,
}

impl TypeKind {
    /// The C# declaration keyword for this category.
    ///
    /// Delegates are not emitted through the keyword path (their whole
    /// declaration is a rewritten `Invoke` header), but the mapping is kept
    /// total anyway.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
        }
    }

    /// Whether instances are value types (`struct` and `enum`)
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Enum)
    }
}

/// Structural shape of a type view.
#[derive(Debug, Clone)]
pub enum TypeFlavor {
    /// An ordinary named type
    Plain,
    /// An array view over an element type
    Array {
        /// Number of dimensions; rank 1 renders `[]`, rank N `[,..]`
        rank: u32,
        /// The element type (owned by the array view's module)
        element: TypeRc,
    },
    /// A generic parameter such as `T` - rendered by bare name, never
    /// namespace-qualified or nesting-expanded
    GenericParam,
}

/// One type as seen by the stripping engine.
///
/// Combines what the CLR exposes across `TypeDef`/`TypeRef` rows with the
/// resolved edges the engine needs: kind, raw attribute flags, marker tags,
/// base/declaring/interface links, nesting, cumulative generic arguments and
/// the ordered member list. Instances are created through [`TypeBuilder`]
/// (or a host adapter) and registered with their owning module.
pub struct TypeDef {
    /// Token identifying this type within its module
    pub token: Token,
    /// Namespace, `None` for global and synthetic types
    pub namespace: Option<String>,
    /// Simple name; generic definitions keep the CLR backtick arity marker
    /// (`List` is named `` List`1 ``)
    pub name: String,
    /// Simple name of the assembly declaring this type
    pub assembly: String,
    /// Raw [`TypeAttributes`] bitmask
    pub flags: u32,
    /// Declaration category
    pub kind: TypeKind,
    /// Custom-attribute derived tags
    pub markers: MarkerFlags,
    /// Structural shape (plain, array, generic parameter)
    pub flavor: TypeFlavor,
    /// Base type ('extends'), unset for interfaces and `System.Object`
    base: OnceLock<TypeLink>,
    /// Enclosing type, set iff this type is nested
    declaring: OnceLock<TypeLink>,
    /// All interfaces this type implements, including inherited ones
    /// (reflection-style transitive set)
    pub interfaces: TypeLinkList,
    /// Types nested directly inside this type
    pub nested_types: TypeLinkList,
    /// Cumulative generic arguments visible on this type, outermost
    /// enclosing type's parameters first. A level's own arity is its
    /// cumulative count minus its declaring type's cumulative count.
    pub generic_args: TypeLinkList,
    /// Declared members in metadata order
    pub members: MemberList,
    /// Underlying numeric type, set iff `kind` is [`TypeKind::Enum`]
    enum_underlying: OnceLock<TypeLink>,
}

impl TypeDef {
    /// Create a new type view with empty edge lists.
    pub fn new(
        token: Token,
        namespace: Option<&str>,
        name: &str,
        assembly: &str,
        flags: u32,
        kind: TypeKind,
        flavor: TypeFlavor,
        markers: MarkerFlags,
    ) -> Self {
        TypeDef {
            token,
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            assembly: assembly.to_string(),
            flags,
            kind,
            markers,
            flavor,
            base: OnceLock::new(),
            declaring: OnceLock::new(),
            interfaces: Arc::new(boxcar::Vec::new()),
            nested_types: Arc::new(boxcar::Vec::new()),
            generic_args: Arc::new(boxcar::Vec::new()),
            members: Arc::new(boxcar::Vec::new()),
            enum_underlying: OnceLock::new(),
        }
    }

    /// Minimal detached view for lattice computations in unit tests.
    pub(crate) fn internal(
        namespace: Option<&str>,
        name: &str,
        assembly: &str,
        flags: u32,
        kind: TypeKind,
    ) -> Self {
        TypeDef::new(
            Token::new(0),
            namespace,
            name,
            assembly,
            flags,
            kind,
            TypeFlavor::Plain,
            MarkerFlags::empty(),
        )
    }

    /// Access the base type of this type, if it exists
    #[must_use]
    pub fn base(&self) -> Option<TypeRc> {
        self.base.get().and_then(TypeLink::upgrade)
    }

    /// Set the base type; may only happen once.
    pub fn set_base(&self, base: &TypeRc) -> Result<()> {
        self.base
            .set(base.into())
            .map_err(|_| malformed_error!("Base type of {} already set", self.name))
    }

    /// Access the enclosing type, present iff this type is nested
    #[must_use]
    pub fn declaring(&self) -> Option<TypeRc> {
        self.declaring.get().and_then(TypeLink::upgrade)
    }

    /// Set the enclosing type; may only happen once.
    pub fn set_declaring(&self, declaring: &TypeRc) -> Result<()> {
        self.declaring
            .set(declaring.into())
            .map_err(|_| malformed_error!("Enclosing type of {} already set", self.name))
    }

    /// Underlying numeric type of an enum
    #[must_use]
    pub fn enum_underlying(&self) -> Option<TypeRc> {
        self.enum_underlying.get().and_then(TypeLink::upgrade)
    }

    /// Set the underlying numeric type of an enum; may only happen once.
    pub fn set_enum_underlying(&self, underlying: &TypeRc) -> Result<()> {
        self.enum_underlying
            .set(underlying.into())
            .map_err(|_| malformed_error!("Enum underlying type of {} already set", self.name))
    }

    /// Whether this type is nested inside another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.declaring.get().is_some()
    }

    /// Whether this view stands for a generic parameter (`T`)
    #[must_use]
    pub fn is_generic_param(&self) -> bool {
        matches!(self.flavor, TypeFlavor::GenericParam)
    }

    /// Whether this type is generic: it carries generic arguments and its
    /// name still holds the backtick arity marker.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.generic_args.count() > 0 && self.name.contains('`')
    }

    /// Whether the type is declared abstract
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags & TypeAttributes::ABSTRACT != 0
    }

    /// Whether the type is declared sealed
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.flags & TypeAttributes::SEALED != 0
    }

    /// Whether the type is an externally visible top-level type
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags & TypeAttributes::VISIBILITY_MASK == TypeAttributes::PUBLIC
    }

    /// Whether the type is a public nested type
    #[must_use]
    pub fn is_nested_public(&self) -> bool {
        self.flags & TypeAttributes::VISIBILITY_MASK == TypeAttributes::NESTED_PUBLIC
    }

    /// The underlying value type if this view is `System.Nullable<T>`
    #[must_use]
    pub fn nullable_underlying(&self) -> Option<&TypeLink> {
        if self.namespace.as_deref() == Some("System")
            && self.name == "Nullable`1"
            && self.generic_args.count() == 1
        {
            self.generic_args.get(0)
        } else {
            None
        }
    }

    /// Whether this view is the `System.Void` pseudo-type
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.namespace.as_deref() == Some("System") && self.name == "Void"
    }

    /// Walk the base-type chain looking for a type with the given qualified
    /// name, stopping at `System.Object`.
    ///
    /// Only classes can match; interfaces, value types and enums answer
    /// `false` without walking. The walk is depth-bounded by
    /// [`MAX_INHERITANCE_DEPTH`].
    pub fn inherits_from(&self, qualified_name: &str) -> Result<bool> {
        if self.kind != TypeKind::Class {
            return Ok(false);
        }
        let mut current = self.base();
        let mut depth = 0;
        while let Some(ty) = current {
            if ty.fullname() == "System.Object" {
                return Ok(false);
            }
            if ty.fullname() == qualified_name {
                return Ok(true);
            }
            depth += 1;
            if depth > MAX_INHERITANCE_DEPTH {
                return Err(crate::Error::RecursionLimit(MAX_INHERITANCE_DEPTH));
            }
            current = ty.base();
        }
        Ok(false)
    }

    /// Returns the full metadata name of the type.
    ///
    /// Nested levels are joined with the CLR `+` separator
    /// (`Ns.Outer+Inner`); renderers normalize the separator to `.` at
    /// emission time. Types without a namespace render by bare name.
    #[must_use]
    pub fn fullname(&self) -> String {
        if let Some(declaring) = self.declaring() {
            return format!("{}+{}", declaring.fullname(), self.name);
        }
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Debug for TypeDef {
    // Compact by hand: deriving would chase the edge lists and, through
    // `TypeFlavor::Array`, require `Debug` on every reachable member view.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDef")
            .field("token", &self.token)
            .field("fullname", &self.fullname())
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullname_joins_nesting_with_plus() {
        let outer = Arc::new(TypeDef::internal(Some("Game.Core"), "Outer", "Game", 0, TypeKind::Class));
        let inner = Arc::new(TypeDef::internal(None, "Inner", "Game", 0, TypeKind::Class));
        inner.set_declaring(&outer).unwrap();
        assert_eq!(inner.fullname(), "Game.Core.Outer+Inner");
        assert!(inner.is_nested());
        assert!(!outer.is_nested());
    }

    #[test]
    fn links_go_stale_when_the_owner_drops() {
        let ty = Arc::new(TypeDef::internal(None, "Gone", "Game", 0, TypeKind::Class));
        let link = TypeLink::new(&ty);
        assert!(link.is_valid());
        drop(ty);
        assert!(!link.is_valid());
        assert!(link.resolve().is_err());
    }

    #[test]
    fn debug_formatting_covers_array_views() {
        let int32 = Arc::new(TypeDef::internal(Some("System"), "Int32", "mscorlib", 0, TypeKind::Struct));
        let flavor = TypeFlavor::Array { rank: 2, element: int32 };
        let text = format!("{flavor:?}");
        assert!(text.contains("rank: 2"));
        assert!(text.contains("System.Int32"));
    }

    #[test]
    fn nullable_detection_requires_one_argument() {
        let nullable = Arc::new(TypeDef::internal(Some("System"), "Nullable`1", "mscorlib", 0, TypeKind::Struct));
        assert!(nullable.nullable_underlying().is_none());

        let int32 = Arc::new(TypeDef::internal(Some("System"), "Int32", "mscorlib", 0, TypeKind::Struct));
        nullable.generic_args.push(TypeLink::new(&int32));
        let underlying = nullable.nullable_underlying().unwrap().resolve().unwrap();
        assert_eq!(underlying.name, "Int32");
    }
}
