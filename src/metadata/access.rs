//! The six-level access lattice.
//!
//! C# declarations carry one of six ordered access levels. The level of a
//! generated declaration is never stored as a single metadata flag - it has
//! to be derived from the visibility of every type the member exposes,
//! relative to the type the declaration lives in. [`of`] maps one referenced
//! type to a level, [`min_of`] folds a set of referenced types down to the
//! least permissive level that is still safe to emit.

use strum::{Display, IntoStaticStr};

use crate::metadata::typesystem::{TypeAttributes, TypeDef};

/// One of the six ordered C# access levels.
///
/// The derived `Ord` follows the lattice: `Private` is the most restrictive,
/// `Public` the most permissive. The `Display` impl renders the exact C#
/// keyword sequence, including the two-token forms.
#[derive(Debug, Display, IntoStaticStr, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessLevel {
    /// `private`
    #[strum(serialize = "private")]
    Private,
    /// `private protected` (family AND assembly)
    #[strum(serialize = "private protected")]
    PrivateProtected,
    /// `protected` (family)
    #[strum(serialize = "protected")]
    Protected,
    /// `internal` (assembly)
    #[strum(serialize = "internal")]
    Internal,
    /// `protected internal` (family OR assembly)
    #[strum(serialize = "protected internal")]
    ProtectedInternal,
    /// `public`
    #[strum(serialize = "public")]
    Public,
}

impl AccessLevel {
    /// The C# keyword sequence for this level, borrowed from the serialized
    /// form so the table cannot drift from the `Display` output.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        (*self).into()
    }
}

/// Access level of `ty` as seen from a declaration inside `context`.
///
/// Types of the same module are always fully accessible, as are externally
/// public types. For everything else the nested-visibility bits decide; an
/// external type with no matching bit (including a non-public top-level
/// type) is treated as `private` so no declaration ever widens access to it.
#[must_use]
pub fn of(ty: &TypeDef, context: &TypeDef) -> AccessLevel {
    if ty.assembly == context.assembly {
        return AccessLevel::Public;
    }
    match ty.flags & TypeAttributes::VISIBILITY_MASK {
        TypeAttributes::PUBLIC | TypeAttributes::NESTED_PUBLIC => AccessLevel::Public,
        TypeAttributes::NESTED_FAM_OR_ASSEM => AccessLevel::ProtectedInternal,
        TypeAttributes::NESTED_ASSEMBLY => AccessLevel::Internal,
        TypeAttributes::NESTED_FAMILY => AccessLevel::Protected,
        TypeAttributes::NESTED_FAM_AND_ASSEM => AccessLevel::PrivateProtected,
        _ => AccessLevel::Private,
    }
}

/// Minimum access level across `types`, relative to `context`.
///
/// Folds [`of`] with an identity of `Public`; an empty iterator therefore
/// yields `Public`. Used to cap a member's declared visibility at the
/// visibility of every type its signature exposes.
pub fn min_of<'a>(
    types: impl IntoIterator<Item = &'a TypeDef>,
    context: &TypeDef,
) -> AccessLevel {
    types
        .into_iter()
        .fold(AccessLevel::Public, |min, ty| min.min(of(ty, context)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::typesystem::{TypeDef, TypeKind};

    fn plain(assembly: &str, flags: u32) -> TypeDef {
        TypeDef::internal(None, "T", assembly, flags, TypeKind::Class)
    }

    #[test]
    fn same_assembly_is_always_public() {
        let ctx = plain("Game", TypeAttributes::NOT_PUBLIC);
        let ty = plain("Game", TypeAttributes::NESTED_PRIVATE);
        assert_eq!(of(&ty, &ctx), AccessLevel::Public);
    }

    #[test]
    fn external_visibility_follows_nested_bits() {
        let ctx = plain("Game", 0);
        for (flags, expected) in [
            (TypeAttributes::PUBLIC, AccessLevel::Public),
            (TypeAttributes::NESTED_PUBLIC, AccessLevel::Public),
            (TypeAttributes::NESTED_FAM_OR_ASSEM, AccessLevel::ProtectedInternal),
            (TypeAttributes::NESTED_ASSEMBLY, AccessLevel::Internal),
            (TypeAttributes::NESTED_FAMILY, AccessLevel::Protected),
            (TypeAttributes::NESTED_FAM_AND_ASSEM, AccessLevel::PrivateProtected),
            (TypeAttributes::NOT_PUBLIC, AccessLevel::Private),
            (TypeAttributes::NESTED_PRIVATE, AccessLevel::Private),
        ] {
            assert_eq!(of(&plain("External", flags), &ctx), expected);
        }
    }

    #[test]
    fn min_of_folds_with_public_identity() {
        let ctx = plain("Game", 0);
        assert_eq!(min_of(std::iter::empty::<&TypeDef>(), &ctx), AccessLevel::Public);

        let internal = plain("External", TypeAttributes::NESTED_ASSEMBLY);
        let public = plain("External", TypeAttributes::PUBLIC);
        assert_eq!(min_of([&public, &internal], &ctx), AccessLevel::Internal);
    }

    #[test]
    fn keywords_match_the_lattice_table() {
        for (level, keyword) in [
            (AccessLevel::Private, "private"),
            (AccessLevel::PrivateProtected, "private protected"),
            (AccessLevel::Protected, "protected"),
            (AccessLevel::Internal, "internal"),
            (AccessLevel::ProtectedInternal, "protected internal"),
            (AccessLevel::Public, "public"),
        ] {
            assert_eq!(level.keyword(), keyword);
            assert_eq!(level.to_string(), keyword);
        }
        assert!(AccessLevel::Private < AccessLevel::Protected);
        assert!(AccessLevel::Internal < AccessLevel::Public);
    }
}
