//! Type attribute flag constants.
//!
//! The subset of ECMA-335 `TypeAttributes` (II.23.1.15) the stripping engine
//! consumes: the 3-bit visibility lattice encoding, the class/interface
//! semantics bit and the inheritance modifiers. Host adapters populate
//! [`crate::metadata::typesystem::TypeDef::flags`] with the raw 4-byte value;
//! everything else in the mask is carried but ignored.

#[allow(non_snake_case)]
/// Flag constants for the `TypeDef` flags field.
pub mod TypeAttributes {
    /// Mask isolating the 3 visibility bits.
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;

    /// Top-level type without public scope (assembly-internal).
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Top-level type visible outside its assembly.
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Nested type, public.
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Nested type, private to the enclosing type.
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;
    /// Nested type, family (protected).
    pub const NESTED_FAMILY: u32 = 0x0000_0004;
    /// Nested type, assembly (internal).
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;
    /// Nested type, family AND assembly (private protected).
    pub const NESTED_FAM_AND_ASSEM: u32 = 0x0000_0006;
    /// Nested type, family OR assembly (protected internal).
    pub const NESTED_FAM_OR_ASSEM: u32 = 0x0000_0007;

    /// Mask isolating the class semantics bit.
    pub const CLASS_SEMANTICS_MASK: u32 = 0x0000_0020;
    /// Type is a class (reference or value type).
    pub const CLASS: u32 = 0x0000_0000;
    /// Type is an interface definition.
    pub const INTERFACE: u32 = 0x0000_0020;

    /// Type is abstract and cannot be instantiated directly.
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Type is sealed and cannot be inherited from.
    pub const SEALED: u32 = 0x0000_0100;
    /// Type name has special meaning to the runtime.
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
    /// Type supports legacy binary serialization.
    pub const SERIALIZABLE: u32 = 0x0000_2000;
}
