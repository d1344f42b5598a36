//! Fluent construction API for type and method views.
//!
//! Host adapters translate platform metadata into the engine's graph through
//! these builders; the test suite uses them to assemble realistic modules.
//! A [`TypeBuilder`] registers its result with the owning
//! [`Module`](crate::metadata::module::Module) - declared types land in the
//! module's enumeration, external and synthetic views are only kept alive.
//!
//! # Example
//!
//! ```rust
//! use dotstrip::metadata::module::Module;
//! use dotstrip::metadata::typesystem::{PrimitiveKind, TypeAttributes, TypeBuilder, TypeKind};
//!
//! let module = Module::new("Game");
//! let ty = TypeBuilder::new(&module, "Widget")
//!     .namespace("Game.Ui")
//!     .kind(TypeKind::Class)
//!     .flags(TypeAttributes::PUBLIC)
//!     .build()?;
//! let int32 = TypeBuilder::primitive(&module, PrimitiveKind::I4);
//! assert_eq!(ty.fullname(), "Game.Ui.Widget");
//! assert_eq!(int32.fullname(), "System.Int32");
//! # Ok::<(), dotstrip::Error>(())
//! ```

use crate::{
    metadata::{
        markers::MarkerFlags,
        member::{Method, MethodAccessFlags, MethodModifiers, MethodRc, Param},
        module::Module,
        typesystem::{
            PrimitiveKind, TypeAttributes, TypeDef, TypeFlavor, TypeKind, TypeLink, TypeRc,
        },
    },
    Result,
};

/// Fluent builder for one [`TypeDef`] view.
pub struct TypeBuilder<'a> {
    module: &'a Module,
    name: String,
    namespace: Option<String>,
    assembly: String,
    flags: u32,
    kind: TypeKind,
    flavor: TypeFlavor,
    markers: MarkerFlags,
    base: Option<TypeRc>,
    declaring: Option<TypeRc>,
    interfaces: Vec<TypeRc>,
    generic_args: Vec<TypeRc>,
    enum_underlying: Option<TypeRc>,
    external: bool,
}

impl<'a> TypeBuilder<'a> {
    /// Start building a type declared by `module`.
    #[must_use]
    pub fn new(module: &'a Module, name: &str) -> Self {
        TypeBuilder {
            module,
            name: name.to_string(),
            namespace: None,
            assembly: module.name.clone(),
            flags: 0,
            kind: TypeKind::Class,
            flavor: TypeFlavor::Plain,
            markers: MarkerFlags::empty(),
            base: None,
            declaring: None,
            interfaces: Vec::new(),
            generic_args: Vec::new(),
            enum_underlying: None,
            external: false,
        }
    }

    /// Set the namespace
    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Mark the type as belonging to another assembly. External views are
    /// registered as references, not as part of the module's API surface.
    #[must_use]
    pub fn external(mut self, assembly: &str) -> Self {
        self.assembly = assembly.to_string();
        self.external = true;
        self
    }

    /// Set the raw [`TypeAttributes`] bitmask
    #[must_use]
    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Set the declaration category
    #[must_use]
    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        if kind == TypeKind::Interface {
            self.flags |= TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT;
        }
        self
    }

    /// Add custom-attribute derived tags
    #[must_use]
    pub fn marker(mut self, marker: MarkerFlags) -> Self {
        self.markers |= marker;
        self
    }

    /// Set the base type ('extends')
    #[must_use]
    pub fn base(mut self, base: &TypeRc) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Nest the type inside `outer`; wires both the declaring link and the
    /// enclosing type's nested list.
    #[must_use]
    pub fn nested_in(mut self, outer: &TypeRc) -> Self {
        self.declaring = Some(outer.clone());
        self
    }

    /// Add an implemented interface
    #[must_use]
    pub fn implements(mut self, interface: &TypeRc) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    /// Append one generic argument. Nested generic types carry the
    /// cumulative list: the enclosing type's arguments first, own arguments
    /// last.
    #[must_use]
    pub fn generic_arg(mut self, arg: &TypeRc) -> Self {
        self.generic_args.push(arg.clone());
        self
    }

    /// Set the underlying numeric type of an enum
    #[must_use]
    pub fn enum_underlying(mut self, underlying: &TypeRc) -> Self {
        self.enum_underlying = Some(underlying.clone());
        self
    }

    /// Register the view with the module and wire all recorded edges.
    pub fn build(self) -> Result<TypeRc> {
        let ty = TypeDef::new(
            self.module.next_token(),
            self.namespace.as_deref(),
            &self.name,
            &self.assembly,
            self.flags,
            self.kind,
            self.flavor,
            self.markers,
        );
        let rc = if self.external {
            self.module.reference(ty)
        } else {
            self.module.declare(ty)
        };
        if let Some(base) = &self.base {
            rc.set_base(base)?;
        }
        if let Some(outer) = &self.declaring {
            rc.set_declaring(outer)?;
            outer.nested_types.push(TypeLink::new(&rc));
        }
        for interface in &self.interfaces {
            rc.interfaces.push(TypeLink::new(interface));
        }
        for arg in &self.generic_args {
            rc.generic_args.push(TypeLink::new(arg));
        }
        if let Some(underlying) = &self.enum_underlying {
            rc.set_enum_underlying(underlying)?;
        }
        Ok(rc)
    }

    /// Reference view for a built-in primitive wrapper type.
    #[must_use]
    pub fn primitive(module: &Module, primitive: PrimitiveKind) -> TypeRc {
        module.reference(TypeDef::new(
            module.next_token(),
            Some("System"),
            primitive.name(),
            "mscorlib",
            TypeAttributes::PUBLIC,
            primitive.kind(),
            TypeFlavor::Plain,
            MarkerFlags::empty(),
        ))
    }

    /// Synthetic array view over `element` with the given rank.
    #[must_use]
    pub fn array_of(module: &Module, element: &TypeRc, rank: u32) -> TypeRc {
        module.reference(TypeDef::new(
            module.next_token(),
            element.namespace.as_deref(),
            &format!("{}[]", element.name),
            &element.assembly,
            element.flags,
            element.kind,
            TypeFlavor::Array {
                rank,
                element: element.clone(),
            },
            MarkerFlags::empty(),
        ))
    }

    /// Synthetic view for a generic parameter such as `T`.
    #[must_use]
    pub fn generic_param(module: &Module, name: &str) -> TypeRc {
        module.reference(TypeDef::new(
            module.next_token(),
            None,
            name,
            &module.name,
            0,
            TypeKind::Class,
            TypeFlavor::GenericParam,
            MarkerFlags::empty(),
        ))
    }
}

/// Fluent builder for one [`Method`] view.
///
/// Produces a detached [`MethodRc`]; the caller attaches it to a type's
/// member list (or to a property) and records override edges afterwards.
pub struct MethodBuilder<'a> {
    module: &'a Module,
    name: String,
    declaring: TypeRc,
    return_type: TypeRc,
    access: MethodAccessFlags,
    modifiers: MethodModifiers,
    markers: MarkerFlags,
    params: Vec<Param>,
    generic_args: Vec<TypeRc>,
}

impl<'a> MethodBuilder<'a> {
    /// Start building a method on `declaring` returning `return_type`.
    #[must_use]
    pub fn new(module: &'a Module, name: &str, declaring: &TypeRc, return_type: &TypeRc) -> Self {
        MethodBuilder {
            module,
            name: name.to_string(),
            declaring: declaring.clone(),
            return_type: return_type.clone(),
            access: MethodAccessFlags::PUBLIC,
            modifiers: MethodModifiers::HIDE_BY_SIG,
            markers: MarkerFlags::empty(),
            params: Vec::new(),
            generic_args: Vec::new(),
        }
    }

    /// Set the access level
    #[must_use]
    pub fn access(mut self, access: MethodAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Add modifier flags
    #[must_use]
    pub fn modifiers(mut self, modifiers: MethodModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Add custom-attribute derived tags
    #[must_use]
    pub fn marker(mut self, marker: MarkerFlags) -> Self {
        self.markers |= marker;
        self
    }

    /// Append a by-value parameter
    #[must_use]
    pub fn param(mut self, name: &str, ty: &TypeRc) -> Self {
        let position = self.params.len() as u32;
        self.params.push(Param {
            name: name.to_string(),
            ty: TypeLink::new(ty),
            by_ref: false,
            is_out: false,
            position,
        });
        self
    }

    /// Append a `ref` parameter
    #[must_use]
    pub fn ref_param(mut self, name: &str, ty: &TypeRc) -> Self {
        let position = self.params.len() as u32;
        self.params.push(Param {
            name: name.to_string(),
            ty: TypeLink::new(ty),
            by_ref: true,
            is_out: false,
            position,
        });
        self
    }

    /// Append an `out` parameter
    #[must_use]
    pub fn out_param(mut self, name: &str, ty: &TypeRc) -> Self {
        let position = self.params.len() as u32;
        self.params.push(Param {
            name: name.to_string(),
            ty: TypeLink::new(ty),
            by_ref: true,
            is_out: true,
            position,
        });
        self
    }

    /// Append a generic parameter declared by the method itself
    #[must_use]
    pub fn generic_arg(mut self, arg: &TypeRc) -> Self {
        self.generic_args.push(arg.clone());
        self
    }

    /// Finish the method view.
    #[must_use]
    pub fn build(self) -> MethodRc {
        MethodRc::new(Method::new(
            self.module.next_token(),
            &self.name,
            self.access.bits() | self.modifiers.bits(),
            self.markers,
            TypeLink::new(&self.declaring),
            TypeLink::new(&self.return_type),
            self.params,
            self.generic_args
                .iter()
                .map(TypeLink::new)
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::member::Member;

    #[test]
    fn builder_wires_nesting_and_generics() -> Result<()> {
        let module = Module::new("Game");
        let t = TypeBuilder::generic_param(&module, "T");
        let outer = TypeBuilder::new(&module, "Outer`1")
            .namespace("Game")
            .flags(TypeAttributes::PUBLIC)
            .generic_arg(&t)
            .build()?;
        let u = TypeBuilder::generic_param(&module, "U");
        let inner = TypeBuilder::new(&module, "Inner`1")
            .flags(TypeAttributes::NESTED_PUBLIC)
            .nested_in(&outer)
            .generic_arg(&t)
            .generic_arg(&u)
            .build()?;

        assert_eq!(inner.declaring().unwrap().token, outer.token);
        assert_eq!(outer.nested_types.count(), 1);
        assert_eq!(inner.generic_args.count(), 2);
        assert!(inner.is_generic());
        Ok(())
    }

    #[test]
    fn method_builder_produces_detached_views() -> Result<()> {
        let module = Module::new("Game");
        let int32 = TypeBuilder::primitive(&module, PrimitiveKind::I4);
        let ty = TypeBuilder::new(&module, "Calc")
            .namespace("Game")
            .flags(TypeAttributes::PUBLIC)
            .build()?;
        let add = MethodBuilder::new(&module, "Add", &ty, &int32)
            .param("a", &int32)
            .param("b", &int32)
            .build();
        ty.members.push(Member::Method(add.clone()));

        assert!(add.is_slot_owner());
        assert_eq!(add.params.len(), 2);
        assert_eq!(ty.members.count(), 1);
        Ok(())
    }
}
