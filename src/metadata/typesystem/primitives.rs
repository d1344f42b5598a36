//! Built-in runtime primitive types.
//!
//! The CLR spells its primitives as `System.*` wrapper types while the C#
//! declaration grammar substitutes fixed alias keywords (`System.Int32` →
//! `int`). [`PrimitiveKind`] enumerates the wrappers the alias table covers
//! and provides the metadata names host adapters and the builder API use to
//! create the corresponding [`super::TypeDef`] views.

use super::TypeKind;

/// The built-in primitive wrapper types with a C# alias keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `System.Void` / `void`
    Void,
    /// `System.Boolean` / `bool`
    Boolean,
    /// `System.Char` / `char`
    Char,
    /// `System.SByte` / `sbyte`
    I1,
    /// `System.Byte` / `byte`
    U1,
    /// `System.Int16` / `short`
    I2,
    /// `System.UInt16` / `ushort`
    U2,
    /// `System.Int32` / `int`
    I4,
    /// `System.UInt32` / `uint`
    U4,
    /// `System.Int64` / `long`
    I8,
    /// `System.UInt64` / `ulong`
    U8,
    /// `System.Single` / `float`
    R4,
    /// `System.Double` / `double`
    R8,
    /// `System.Decimal` / `decimal`
    Decimal,
    /// `System.String` / `string`
    String,
    /// `System.Object` / `object`
    Object,
}

impl PrimitiveKind {
    /// The simple metadata name of the wrapper type (without namespace)
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Void => "Void",
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::I1 => "SByte",
            PrimitiveKind::U1 => "Byte",
            PrimitiveKind::I2 => "Int16",
            PrimitiveKind::U2 => "UInt16",
            PrimitiveKind::I4 => "Int32",
            PrimitiveKind::U4 => "UInt32",
            PrimitiveKind::I8 => "Int64",
            PrimitiveKind::U8 => "UInt64",
            PrimitiveKind::R4 => "Single",
            PrimitiveKind::R8 => "Double",
            PrimitiveKind::Decimal => "Decimal",
            PrimitiveKind::String => "String",
            PrimitiveKind::Object => "Object",
        }
    }

    /// The C# alias keyword substituted for the qualified name
    #[must_use]
    pub fn alias(&self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Boolean => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::I1 => "sbyte",
            PrimitiveKind::U1 => "byte",
            PrimitiveKind::I2 => "short",
            PrimitiveKind::U2 => "ushort",
            PrimitiveKind::I4 => "int",
            PrimitiveKind::U4 => "uint",
            PrimitiveKind::I8 => "long",
            PrimitiveKind::U8 => "ulong",
            PrimitiveKind::R4 => "float",
            PrimitiveKind::R8 => "double",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::String => "string",
            PrimitiveKind::Object => "object",
        }
    }

    /// Declaration category of the wrapper type
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        match self {
            PrimitiveKind::String | PrimitiveKind::Object => TypeKind::Class,
            _ => TypeKind::Struct,
        }
    }

    /// Look up the alias for a simple metadata name, if the name denotes a
    /// primitive wrapper. This is keyed on the simple name alone, matching
    /// how the declaration grammar substitutes aliases.
    #[must_use]
    pub fn alias_for(name: &str) -> Option<&'static str> {
        let kind = match name {
            "Void" => PrimitiveKind::Void,
            "Boolean" => PrimitiveKind::Boolean,
            "Char" => PrimitiveKind::Char,
            "SByte" => PrimitiveKind::I1,
            "Byte" => PrimitiveKind::U1,
            "Int16" => PrimitiveKind::I2,
            "UInt16" => PrimitiveKind::U2,
            "Int32" => PrimitiveKind::I4,
            "UInt32" => PrimitiveKind::U4,
            "Int64" => PrimitiveKind::I8,
            "UInt64" => PrimitiveKind::U8,
            "Single" => PrimitiveKind::R4,
            "Double" => PrimitiveKind::R8,
            "Decimal" => PrimitiveKind::Decimal,
            "String" => PrimitiveKind::String,
            "Object" => PrimitiveKind::Object,
            _ => return None,
        };
        Some(kind.alias())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_wrapper_has_a_distinct_alias() {
        let kinds = [
            PrimitiveKind::Void,
            PrimitiveKind::Boolean,
            PrimitiveKind::Char,
            PrimitiveKind::I1,
            PrimitiveKind::U1,
            PrimitiveKind::I2,
            PrimitiveKind::U2,
            PrimitiveKind::I4,
            PrimitiveKind::U4,
            PrimitiveKind::I8,
            PrimitiveKind::U8,
            PrimitiveKind::R4,
            PrimitiveKind::R8,
            PrimitiveKind::Decimal,
            PrimitiveKind::String,
            PrimitiveKind::Object,
        ];
        let mut aliases: Vec<_> = kinds.iter().map(|k| k.alias()).collect();
        aliases.sort_unstable();
        aliases.dedup();
        assert_eq!(aliases.len(), kinds.len());

        for kind in kinds {
            assert_eq!(PrimitiveKind::alias_for(kind.name()), Some(kind.alias()));
        }
        assert_eq!(PrimitiveKind::alias_for("Transform"), None);
    }
}
