//! Member views: fields, properties, methods and constructors.
//!
//! Members are read-only views produced at module load, held by their
//! declaring [`crate::metadata::typesystem::TypeDef`] through the closed
//! [`Member`] variant type. The stripper matches `Member` exhaustively - no
//! member category can be added without the emission passes seeing it.
//!
//! Raw attribute bitmasks follow the ECMA-335 encodings and are split into
//! logical [`bitflags`] groups with extractors, so call sites never mask
//! bits by hand.

use std::sync::{Arc, OnceLock, Weak};

use bitflags::bitflags;

use crate::metadata::{access::AccessLevel, markers::MarkerFlags, token::Token, typesystem::TypeLink};

/// Strong reference to a [`Field`]
pub type FieldRc = Arc<Field>;
/// Strong reference to a [`Property`]
pub type PropertyRc = Arc<Property>;
/// Strong reference to a [`Method`]
pub type MethodRc = Arc<Method>;
/// Strong reference to a [`Constructor`]
pub type ConstructorRc = Arc<Constructor>;
/// Ordered, shared member list of a type
pub type MemberList = Arc<boxcar::Vec<Member>>;

/// Bitmask for member access extraction
pub const MEMBER_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    /// Method access flags (low 3 bits of the method attributes)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessible by anyone in the assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessible by sub-types anywhere, plus anyone in the assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessible by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & MEMBER_ACCESS_MASK)
    }
}

bitflags! {
    /// Method modifiers and properties
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special (accessors, operators, constructors)
        const SPECIAL_NAME = 0x0800;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MEMBER_ACCESS_MASK)
    }
}

#[allow(non_snake_case)]
/// Flag constants for the field attributes bitmask (ECMA-335 II.23.1.5 subset).
pub mod FieldAttributes {
    /// Mask isolating the 3 access bits
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Accessible only by the parent type
    pub const PRIVATE: u32 = 0x0001;
    /// Accessible by sub-types only in this assembly
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// Accessible by anyone in the assembly
    pub const ASSEMBLY: u32 = 0x0003;
    /// Accessible only by type and sub-types
    pub const FAMILY: u32 = 0x0004;
    /// Accessible by sub-types anywhere, plus anyone in the assembly
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// Accessible by anyone who has visibility to this scope
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on type, else per instance
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized, not written after init
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is a compile-time constant (enum members)
    pub const LITERAL: u32 = 0x0040;
    /// Field does not take part in serialization
    pub const NOT_SERIALIZED: u32 = 0x0080;
}

/// A closed variant over every member category a type declares.
///
/// The stripper's emission passes match this exhaustively; each pass picks
/// the categories it is responsible for and leaves the rest untouched.
#[derive(Clone)]
pub enum Member {
    /// A declared field
    Field(FieldRc),
    /// A declared property (getter/setter pair)
    Property(PropertyRc),
    /// A declared method
    Method(MethodRc),
    /// A declared instance or type constructor
    Constructor(ConstructorRc),
}

/// One declared field.
pub struct Field {
    /// Token identifying this field within its module
    pub token: Token,
    /// Field name
    pub name: String,
    /// Raw [`FieldAttributes`] bitmask
    pub flags: u32,
    /// Custom-attribute derived tags
    pub markers: MarkerFlags,
    /// Declared field type
    pub ty: TypeLink,
    /// Compile-time constant slot; set for enum members
    pub literal: Option<i64>,
}

impl Field {
    /// Whether the field is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags & FieldAttributes::STATIC != 0
    }

    /// Whether the field is declared public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags & FieldAttributes::FIELD_ACCESS_MASK == FieldAttributes::PUBLIC
    }

    /// Whether the field is a compile-time constant (an enum member slot)
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.flags & FieldAttributes::LITERAL != 0
    }

    /// The field's declared access level on the six-level lattice.
    #[must_use]
    pub fn declared_access(&self) -> AccessLevel {
        match self.flags & FieldAttributes::FIELD_ACCESS_MASK {
            FieldAttributes::PUBLIC => AccessLevel::Public,
            FieldAttributes::FAM_OR_ASSEM => AccessLevel::ProtectedInternal,
            FieldAttributes::ASSEMBLY => AccessLevel::Internal,
            FieldAttributes::FAMILY => AccessLevel::Protected,
            FieldAttributes::FAM_AND_ASSEM => AccessLevel::PrivateProtected,
            _ => AccessLevel::Private,
        }
    }
}

/// One parameter of a method or constructor.
///
/// For by-reference parameters `ty` links the element type; the reference
/// shape lives in the `by_ref`/`is_out` flags.
#[derive(Clone)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Parameter type (element type when passed by reference)
    pub ty: TypeLink,
    /// Passed by reference (`ref` unless also `is_out`)
    pub by_ref: bool,
    /// Output parameter (`out`)
    pub is_out: bool,
    /// Zero-based position in the parameter list
    pub position: u32,
}

/// A weak reference to a [`Method`], used for override-chain edges.
#[derive(Clone)]
pub struct MethodLink {
    weak_ref: Weak<Method>,
}

impl MethodLink {
    /// Create a new link from a strong reference
    #[must_use]
    pub fn new(strong_ref: &MethodRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the method, returning `None` if dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<MethodRc> {
        self.weak_ref.upgrade()
    }

    /// Token of the referenced method (if still alive)
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.upgrade().map(|m| m.token)
    }
}

/// One declared method.
pub struct Method {
    /// Token identifying this method within its module
    pub token: Token,
    /// Method name; explicit interface implementations carry the dotted
    /// interface-qualified form, accessors the `get_`/`set_` prefix
    pub name: String,
    /// Raw method attributes bitmask
    pub flags: u32,
    /// Custom-attribute derived tags
    pub markers: MarkerFlags,
    /// The type declaring this method
    pub declaring: TypeLink,
    /// Return type (`System.Void` for void methods)
    pub return_type: TypeLink,
    /// Ordered parameter list
    pub params: Vec<Param>,
    /// Generic parameters declared by the method itself
    pub generic_args: Vec<TypeLink>,
    /// Topmost method of the override chain; unset (or equal to self) when
    /// this method introduces its own slot
    base_definition: OnceLock<MethodLink>,
}

impl Method {
    /// Create a new method view with no base definition recorded.
    pub fn new(
        token: Token,
        name: &str,
        flags: u32,
        markers: MarkerFlags,
        declaring: TypeLink,
        return_type: TypeLink,
        params: Vec<Param>,
        generic_args: Vec<TypeLink>,
    ) -> Self {
        Method {
            token,
            name: name.to_string(),
            flags,
            markers,
            declaring,
            return_type,
            params,
            generic_args,
            base_definition: OnceLock::new(),
        }
    }

    /// Record the topmost method of the override chain; may only happen once.
    pub fn set_base_definition(&self, base: &MethodRc) -> crate::Result<()> {
        self.base_definition
            .set(MethodLink::new(base))
            .map_err(|_| malformed_error!("Base definition of {} already set", self.name))
    }

    /// The topmost method of the override chain, if one was recorded and is
    /// distinct from this method.
    #[must_use]
    pub fn base_definition(&self) -> Option<MethodRc> {
        self.base_definition
            .get()
            .and_then(MethodLink::upgrade)
            .filter(|base| base.token != self.token)
    }

    /// Whether this method introduces its own override slot (equals its own
    /// base definition).
    #[must_use]
    pub fn is_slot_owner(&self) -> bool {
        self.base_definition().is_none()
    }

    /// Access flags extracted from the raw attributes
    #[must_use]
    pub fn access(&self) -> MethodAccessFlags {
        MethodAccessFlags::from_method_flags(self.flags)
    }

    /// Modifier flags extracted from the raw attributes
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// Whether the method is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// Whether the method is virtual
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.modifiers().contains(MethodModifiers::VIRTUAL)
    }

    /// Whether the method is abstract
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers().contains(MethodModifiers::ABSTRACT)
    }

    /// Whether the method seals its virtual slot
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers().contains(MethodModifiers::FINAL)
    }

    /// Whether the method access level is assembly (`internal`)
    #[must_use]
    pub fn is_assembly(&self) -> bool {
        self.access() == MethodAccessFlags::ASSEM
    }

    /// Whether the method access level is family (`protected`)
    #[must_use]
    pub fn is_family(&self) -> bool {
        self.access() == MethodAccessFlags::FAMILY
    }

    /// Whether the method access level is public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access() == MethodAccessFlags::PUBLIC
    }

    /// Whether the method access level is private
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.access() == MethodAccessFlags::PRIVATE
    }

    /// Whether the method declares its own generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_args.is_empty()
    }

    /// Whether the method is an extension method (receiver-first)
    #[must_use]
    pub fn is_extension(&self) -> bool {
        self.markers.contains(MarkerFlags::EXTENSION)
    }
}

/// One declared property.
///
/// At least one accessor must be present; a property with neither getter nor
/// setter is rejected as an input fault when the stripper reaches it.
pub struct Property {
    /// Token identifying this property within its module
    pub token: Token,
    /// Property name; `Item` for indexers, dotted for explicit interface
    /// implementations
    pub name: String,
    /// Custom-attribute derived tags
    pub markers: MarkerFlags,
    /// Declared property type
    pub ty: TypeLink,
    /// Getter accessor method, if present
    pub getter: Option<MethodRc>,
    /// Setter accessor method, if present
    pub setter: Option<MethodRc>,
}

/// One declared constructor.
pub struct Constructor {
    /// Token identifying this constructor within its module
    pub token: Token,
    /// Raw method attributes bitmask
    pub flags: u32,
    /// Custom-attribute derived tags
    pub markers: MarkerFlags,
    /// The type declaring this constructor
    pub declaring: TypeLink,
    /// Ordered parameter list
    pub params: Vec<Param>,
}

impl Constructor {
    /// Whether this is the type initializer (`static` constructor)
    #[must_use]
    pub fn is_static(&self) -> bool {
        MethodModifiers::from_method_flags(self.flags).contains(MethodModifiers::STATIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_and_modifier_extraction_split_the_mask() {
        let flags = MethodAccessFlags::FAMILY.bits() | MethodModifiers::VIRTUAL.bits() | MethodModifiers::STATIC.bits();
        assert_eq!(MethodAccessFlags::from_method_flags(flags), MethodAccessFlags::FAMILY);
        let mods = MethodModifiers::from_method_flags(flags);
        assert!(mods.contains(MethodModifiers::VIRTUAL));
        assert!(mods.contains(MethodModifiers::STATIC));
        assert!(!mods.contains(MethodModifiers::ABSTRACT));
    }

    #[test]
    fn field_access_helpers() {
        let field = Field {
            token: Token::new(1),
            name: "counter".into(),
            flags: FieldAttributes::PUBLIC | FieldAttributes::STATIC,
            markers: MarkerFlags::empty(),
            ty: TypeLink::new(&std::sync::Arc::new(
                crate::metadata::typesystem::TypeDef::internal(Some("System"), "Int32", "mscorlib", 0, crate::metadata::typesystem::TypeKind::Struct),
            )),
            literal: None,
        };
        assert!(field.is_public());
        assert!(field.is_static());
        assert!(!field.is_literal());
    }
}
