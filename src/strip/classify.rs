//! Modifier and keyword derivation for emitted declarations.
//!
//! Metadata does not store C# surface keywords; they have to be derived
//! from attribute flags, override edges and the visibility of every type a
//! signature exposes. The texts returned here carry their trailing space so
//! callers concatenate them directly.

use crate::{
    metadata::{
        access,
        member::{Method, Property},
        typesystem::TypeKind,
    },
    Result,
};

/// Property name the runtime gives indexers
pub const INDEXER_NAME: &str = "Item";

/// Method name of the finalizer slot
pub const FINALIZER_NAME: &str = "Finalize";

/// Least permissive access level any type in the method's signature allows,
/// relative to the declaring type, as keyword text.
///
/// Declaring a member more visible than a type it exposes does not compile,
/// so the emitted modifier is capped at the minimum over all parameter
/// types and the return type.
fn min_access_text(method: &Method) -> Result<String> {
    let declaring = method.declaring.resolve()?;
    let mut exposed = Vec::with_capacity(method.params.len() + 1);
    for param in &method.params {
        exposed.push(param.ty.resolve()?);
    }
    exposed.push(method.return_type.resolve()?);
    let min = access::min_of(exposed.iter().map(|ty| ty.as_ref()), &declaring);
    Ok(format!("{} ", min.keyword()))
}

/// Access modifier text for a method declaration.
///
/// Slot owners and overrides of same-module methods get the minimum-access
/// computation. Overrides of external methods must repeat the base access
/// level instead, because C# rejects overrides that change accessibility.
pub fn access_modifier_text(method: &Method) -> Result<String> {
    let Some(base) = method.base_definition() else {
        return min_access_text(method);
    };
    let declaring = method.declaring.resolve()?;
    let base_declaring = base.declaring.resolve()?;
    if declaring.assembly == base_declaring.assembly {
        return min_access_text(method);
    }
    let mut signature = min_access_text(method)?;
    if base.is_assembly() {
        signature = "internal ".to_string();
        if base.is_family() {
            signature.push_str("protected ");
        }
    } else if base.is_public() {
        signature = min_access_text(method)?;
    } else if base.is_private() {
        signature = "private ".to_string();
    } else if base.is_family() {
        signature = "protected ".to_string();
    }
    Ok(signature)
}

/// Accessor text (access modifier plus `static`) for a method declaration.
///
/// Interface members never carry one.
pub fn accessor_text(method: &Method) -> Result<String> {
    let declaring = method.declaring.resolve()?;
    if declaring.kind == TypeKind::Interface {
        return Ok(String::new());
    }
    let mut signature = access_modifier_text(method)?;
    if method.is_static() {
        signature.push_str("static ");
    }
    Ok(signature)
}

/// Modifier text (`override`, `abstract` or `virtual`) for a method
/// declaration. Interface members never carry one; a method that does not
/// own its slot is an override regardless of other flags.
pub fn modifier_text(method: &Method) -> Result<String> {
    let declaring = method.declaring.resolve()?;
    if declaring.kind == TypeKind::Interface {
        return Ok(String::new());
    }
    let mut modifiers = String::new();
    if !method.is_slot_owner() {
        modifiers.push_str("override ");
    } else if method.is_abstract() && !method.is_final() {
        modifiers.push_str("abstract ");
    } else if method.is_virtual() && !method.is_final() {
        modifiers.push_str("virtual ");
    }
    Ok(modifiers)
}

/// Whether the property is an indexer: named `Item` with index parameters
/// on whichever accessor is present (the setter's last parameter is the
/// value, so it needs more than one).
pub fn is_indexer(property: &Property) -> Result<bool> {
    if property.name != INDEXER_NAME {
        return Ok(false);
    }
    match (&property.getter, &property.setter) {
        (Some(getter), _) => Ok(!getter.params.is_empty()),
        (None, Some(setter)) => Ok(setter.params.len() > 1),
        (None, None) => Err(malformed_error!(
            "Property {} has neither getter nor setter",
            property.name
        )),
    }
}

/// Whether the method is a user-defined conversion operator. Implicit
/// conversions match by name alone; explicit ones only when static.
#[must_use]
pub fn is_conversion_operator(method: &Method) -> bool {
    method.name == "op_Implicit" || (method.name == "op_Explicit" && method.is_static())
}

/// Rewrite a rendered conversion-operator signature into C# operator
/// syntax: the metadata name is removed and the conversion keyword plus
/// `operator` is spliced in after `static`.
#[must_use]
pub fn rewrite_conversion_operator(signature: &str, method: &Method) -> String {
    let keyword = method.name.replace("op_", "").to_lowercase();
    signature
        .replace(&format!(" {}", method.name), "")
        .replace(" static ", &format!(" static {keyword} operator "))
}

/// Whether the method is the finalizer: named `Finalize` with its override
/// slot rooted at `System.Object`.
pub fn is_finalizer(method: &Method) -> Result<bool> {
    if method.name != FINALIZER_NAME {
        return Ok(false);
    }
    let slot_declaring = match method.base_definition() {
        Some(base) => base.declaring.resolve()?,
        None => method.declaring.resolve()?,
    };
    Ok(slot_declaring.fullname() == "System.Object")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        member::MethodAccessFlags,
        module::Module,
        typesystem::{MethodBuilder, PrimitiveKind, TypeAttributes, TypeBuilder},
    };

    #[test]
    fn min_access_caps_at_internal_parameter_types() -> Result<()> {
        let module = Module::new("Game");
        let int32 = TypeBuilder::primitive(&module, PrimitiveKind::I4);
        let secret = TypeBuilder::new(&module, "Secret")
            .namespace("Vendor")
            .external("Vendor")
            .flags(TypeAttributes::NESTED_ASSEMBLY)
            .build()?;
        let ty = TypeBuilder::new(&module, "Widget")
            .namespace("Game")
            .flags(TypeAttributes::PUBLIC)
            .build()?;

        let open = MethodBuilder::new(&module, "Open", &ty, &int32)
            .param("count", &int32)
            .build();
        assert_eq!(access_modifier_text(&open)?, "public ");

        let hidden = MethodBuilder::new(&module, "Hidden", &ty, &int32)
            .param("secret", &secret)
            .build();
        assert_eq!(access_modifier_text(&hidden)?, "internal ");
        Ok(())
    }

    #[test]
    fn external_override_repeats_base_visibility() -> Result<()> {
        let module = Module::new("Game");
        let void = TypeBuilder::primitive(&module, PrimitiveKind::Void);
        let external = TypeBuilder::new(&module, "Behaviour")
            .namespace("Vendor")
            .external("Vendor")
            .flags(TypeAttributes::PUBLIC)
            .build()?;
        let ty = TypeBuilder::new(&module, "Widget")
            .namespace("Game")
            .flags(TypeAttributes::PUBLIC)
            .base(&external)
            .build()?;

        let base = MethodBuilder::new(&module, "Update", &external, &void)
            .access(MethodAccessFlags::FAMILY)
            .build();
        let update = MethodBuilder::new(&module, "Update", &ty, &void)
            .access(MethodAccessFlags::FAMILY)
            .build();
        update.set_base_definition(&base)?;

        assert_eq!(access_modifier_text(&update)?, "protected ");
        assert_eq!(modifier_text(&update)?, "override ");
        Ok(())
    }

    #[test]
    fn conversion_operator_detection() {
        let module = Module::new("Game");
        let int32 = TypeBuilder::primitive(&module, PrimitiveKind::I4);
        let ty = TypeBuilder::new(&module, "Wrapper")
            .namespace("Game")
            .flags(TypeAttributes::PUBLIC)
            .build()
            .unwrap();

        let implicit = MethodBuilder::new(&module, "op_Implicit", &ty, &int32).build();
        assert!(is_conversion_operator(&implicit));

        let explicit_instance = MethodBuilder::new(&module, "op_Explicit", &ty, &int32).build();
        assert!(!is_conversion_operator(&explicit_instance));
    }
}
