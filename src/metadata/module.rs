//! The owning view of one loaded module.
//!
//! A [`Module`] holds strong references to every [`TypeDef`] produced for a
//! stripping run - declared types, nested types, and the referenced or
//! synthetic views (external base types, primitives, arrays, generic
//! parameters) that member signatures point at through weak links. Dropping
//! the module releases the entire graph.
//!
//! Enumeration order is insertion order, which host adapters are expected to
//! keep equal to metadata declaration order; the walker's output is
//! therefore deterministic.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::metadata::{
    token::Token,
    typesystem::{TypeDef, TypeRc},
};

/// The name the runtime gives the hidden global-scaffolding type; the walker
/// never emits a file for it.
pub const PRIVATE_IMPLEMENTATION_DETAILS: &str = "<PrivateImplementationDetails>";

/// One loaded module and the type graph built from its metadata.
pub struct Module {
    /// Simple assembly name, used for output paths and same-module checks
    pub name: String,
    /// Every type view owned by this run (declared + referenced)
    types: boxcar::Vec<TypeRc>,
    /// Types declared by this module, in metadata order
    declared: boxcar::Vec<TypeRc>,
    /// Monotonic token allocator for builder-produced views
    next_token: AtomicU32,
}

impl Module {
    /// Create an empty module view for the given assembly name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Module {
            name: name.to_string(),
            types: boxcar::Vec::new(),
            declared: boxcar::Vec::new(),
            next_token: AtomicU32::new(1),
        }
    }

    /// Allocate the next metadata token for a builder-produced view.
    pub fn next_token(&self) -> Token {
        Token::new(self.next_token.fetch_add(1, Ordering::Relaxed))
    }

    /// Register a type declared by this module. The module takes ownership;
    /// the returned strong reference is what builders wire links against.
    pub fn declare(&self, ty: TypeDef) -> TypeRc {
        let rc = TypeRc::new(ty);
        self.types.push(rc.clone());
        self.declared.push(rc.clone());
        rc
    }

    /// Register a referenced or synthetic type view (external type,
    /// primitive, array, generic parameter). Kept alive for the run but
    /// never enumerated as part of this module's API surface.
    pub fn reference(&self, ty: TypeDef) -> TypeRc {
        let rc = TypeRc::new(ty);
        self.types.push(rc.clone());
        rc
    }

    /// Every non-nested type declared by this module, in declaration order.
    pub fn top_level(&self) -> impl Iterator<Item = &TypeRc> {
        self.declared.iter().map(|(_, ty)| ty).filter(|ty| !ty.is_nested())
    }

    /// Every type declared by this module, nested types included.
    pub fn declared(&self) -> impl Iterator<Item = &TypeRc> {
        self.declared.iter().map(|(_, ty)| ty)
    }

    /// Number of types owned by this run (declared + referenced)
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::typesystem::{TypeKind, TypeLink};

    #[test]
    fn top_level_excludes_nested_and_referenced_types() {
        let module = Module::new("Game");
        let outer = module.declare(TypeDef::internal(Some("Game"), "Outer", "Game", 0, TypeKind::Class));
        let inner = module.declare(TypeDef::internal(None, "Inner", "Game", 0, TypeKind::Class));
        inner.set_declaring(&outer).unwrap();
        outer.nested_types.push(TypeLink::new(&inner));
        module.reference(TypeDef::internal(Some("System"), "Object", "mscorlib", 0, TypeKind::Class));

        let top: Vec<_> = module.top_level().map(|t| t.name.clone()).collect();
        assert_eq!(top, vec!["Outer"]);
        assert_eq!(module.type_count(), 3);
    }

    #[test]
    fn tokens_are_monotonic() {
        let module = Module::new("Game");
        let a = module.next_token();
        let b = module.next_token();
        assert!(b > a);
    }
}
