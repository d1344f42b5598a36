//! Signature rendering: metadata views back to C# source text.
//!
//! The type renderer handles the shapes the runtime folds into one view:
//! nested generic hierarchies (with cumulative generic arguments partitioned
//! across nesting levels), arrays of any rank, `Nullable<T>` shorthand,
//! primitive keyword aliases and namespace-relative shortening. Method and
//! constructor rendering composes the type renderer with the keyword
//! derivations from [`crate::strip::classify`].

use crate::{
    metadata::{
        member::{Constructor, Method, Param},
        typesystem::{PrimitiveKind, TypeDef, TypeFlavor, TypeLinkList, TypeRc},
    },
    strip::classify,
    Result,
};

/// Render a type with its full qualified name, shortened relative to
/// `namespace` when it lives in that namespace.
pub fn render_type(ty: &TypeRc, namespace: Option<&str>) -> Result<String> {
    render_inner(ty, true, false, None, namespace)
}

/// Render a type by simple name plus generic arguments, as used in
/// declaration headers and delegate rewrites.
pub fn render_type_short(ty: &TypeRc) -> Result<String> {
    render_inner(ty, false, true, None, None)
}

fn resolve_args(links: &TypeLinkList) -> Result<Vec<TypeRc>> {
    let mut args = Vec::with_capacity(links.count());
    for (_, link) in links.iter() {
        args.push(link.resolve()?);
    }
    Ok(args)
}

fn render_inner(
    ty: &TypeRc,
    full_name: bool,
    skip_nesting: bool,
    generics_override: Option<&[TypeRc]>,
    namespace: Option<&str>,
) -> Result<String> {
    if ty.is_nested() && !skip_nesting && !ty.is_generic_param() && full_name {
        return render_nesting_hierarchy(ty, namespace);
    }

    let (element, array_rank) = match &ty.flavor {
        TypeFlavor::Array { rank, element } => (element.clone(), Some(*rank)),
        _ => (ty.clone(), None),
    };
    let (target, is_nullable) = match element.nullable_underlying() {
        Some(link) => (link.resolve()?, true),
        None => (element.clone(), false),
    };

    let mut signature = qualified_name(&target, full_name && !ty.is_nested());

    if target.is_generic() {
        let resolved;
        let args: &[TypeRc] = match generics_override {
            Some(over) => over,
            None => {
                resolved = resolve_args(&target.generic_args)?;
                &resolved
            }
        };
        signature.push_str(&render_generics(args, namespace)?);
    }

    if is_nullable {
        signature.push('?');
    }

    if let Some(rank) = array_rank {
        signature.push('[');
        for _ in 1..rank {
            signature.push(',');
        }
        signature.push(']');
    }

    if full_name && !element.is_generic_param() {
        if let (Some(context), Some(ns)) = (namespace, element.namespace.as_deref()) {
            if context == ns {
                if let Some(shortened) = signature.strip_prefix(&format!("{ns}.")) {
                    signature = shortened.to_string();
                }
            }
        }
    }

    Ok(signature.replace('+', "."))
}

/// Render a nested type as its dotted hierarchy, outermost level first.
///
/// The cumulative generic argument list of the innermost type is
/// partitioned across the levels: each level takes its cumulative arity
/// minus what the enclosing levels already consumed. Slices are clamped so
/// inconsistent arities in malformed metadata never index out of bounds.
fn render_nesting_hierarchy(ty: &TypeRc, namespace: Option<&str>) -> Result<String> {
    let mut levels = vec![ty.clone()];
    let mut outer = ty.declaring();
    while let Some(level) = outer {
        outer = level.declaring();
        levels.push(level);
    }
    levels.reverse();

    let args = resolve_args(&ty.generic_args)?;
    let mut taken = 0usize;
    let mut parts = Vec::with_capacity(levels.len());
    for (index, level) in levels.iter().enumerate() {
        let take = level
            .generic_args
            .count()
            .saturating_sub(taken)
            .min(args.len() - taken);
        let slice = &args[taken..taken + take];
        parts.push(render_inner(level, index == 0, true, Some(slice), namespace)?);
        taken += take;
    }
    Ok(parts.join("."))
}

/// Comma-separated generic argument list in angle brackets.
fn render_generics(args: &[TypeRc], namespace: Option<&str>) -> Result<String> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        parts.push(render_inner(arg, true, false, None, namespace)?);
    }
    Ok(format!("<{}>", parts.join(", ")))
}

/// Simple or fully qualified name of a type, with primitive names replaced
/// by their C# keyword aliases and the backtick arity marker stripped from
/// generic definitions.
#[must_use]
pub(crate) fn qualified_name(ty: &TypeDef, use_full_name: bool) -> String {
    if let Some(alias) = PrimitiveKind::alias_for(&ty.name) {
        return alias.to_string();
    }
    let mut signature = if use_full_name {
        ty.fullname()
    } else {
        ty.name.clone()
    };
    if ty.is_generic() {
        if let Some(index) = signature.find('`') {
            signature.truncate(index);
        }
    }
    signature
}

/// Render a method declaration or invocation.
///
/// `invokable` renders a call site (names only, receiver of extension
/// methods skipped); otherwise a declaration with accessor, modifiers and
/// return type. `skip_last` drops the trailing parameter (the value
/// parameter of setter accessors). `skip_accessor` suppresses the access
/// modifier for explicit interface implementations.
pub fn render_method(
    method: &Method,
    invokable: bool,
    skip_last: bool,
    namespace: Option<&str>,
    skip_accessor: bool,
) -> Result<String> {
    let mut signature = String::new();
    if !invokable {
        if !skip_accessor {
            signature.push_str(&classify::accessor_text(method)?);
        }
        signature.push_str(&classify::modifier_text(method)?);
        let return_type = method.return_type.resolve()?;
        signature.push_str(&render_inner(&return_type, true, false, None, namespace)?);
        signature.push(' ');
    }

    signature.push_str(&method.name);

    if method.is_generic() {
        let mut args = Vec::with_capacity(method.generic_args.len());
        for link in &method.generic_args {
            args.push(link.resolve()?);
        }
        signature.push_str(&render_generics(&args, namespace)?);
    }

    signature.push_str(&render_params(
        &method.params,
        method.is_extension(),
        invokable,
        skip_last,
        namespace,
    )?);
    Ok(signature)
}

/// Render a constructor declaration; the emitted name is the declaring
/// type's simple name with the arity marker stripped.
pub fn render_constructor(ctor: &Constructor, namespace: Option<&str>) -> Result<String> {
    let declaring = ctor.declaring.resolve()?;
    let accessor = if ctor.is_static() { "static " } else { "public " };
    let name = qualified_name(&declaring, false);
    let params = render_params(&ctor.params, false, false, false, namespace)?;
    Ok(format!("{accessor}{name}{params}"))
}

fn render_params(
    params: &[Param],
    is_extension: bool,
    invokable: bool,
    skip_last: bool,
    namespace: Option<&str>,
) -> Result<String> {
    let mut slice = params;
    // A call site provides the extension receiver itself
    if is_extension && invokable && !slice.is_empty() {
        slice = &slice[1..];
    }
    if skip_last && !slice.is_empty() {
        slice = &slice[..slice.len() - 1];
    }

    let mut parts = Vec::with_capacity(slice.len());
    for param in slice {
        let mut rendered = String::new();
        if param.is_out {
            rendered.push_str("out ");
        } else if param.by_ref {
            rendered.push_str("ref ");
        } else if is_extension && param.position == 0 {
            rendered.push_str("this ");
        }
        if !invokable {
            let ty = param.ty.resolve()?;
            rendered.push_str(&render_inner(&ty, true, false, None, namespace)?);
            rendered.push(' ');
        }
        rendered.push_str(&param.name);
        parts.push(rendered);
    }
    Ok(format!("({})", parts.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        module::Module,
        typesystem::{
            MethodBuilder, PrimitiveKind, TypeAttributes, TypeBuilder, TypeKind, TypeLink,
        },
    };

    fn module() -> Module {
        Module::new("Game")
    }

    #[test]
    fn primitive_aliases_and_arrays() -> Result<()> {
        let module = module();
        let int32 = TypeBuilder::primitive(&module, PrimitiveKind::I4);
        assert_eq!(render_type(&int32, None)?, "int");

        let matrix = TypeBuilder::array_of(&module, &int32, 2);
        assert_eq!(render_type(&matrix, None)?, "int[,]");
        Ok(())
    }

    #[test]
    fn nullable_shorthand() -> Result<()> {
        let module = module();
        let int32 = TypeBuilder::primitive(&module, PrimitiveKind::I4);
        let nullable = TypeBuilder::new(&module, "Nullable`1")
            .namespace("System")
            .external("mscorlib")
            .flags(TypeAttributes::PUBLIC)
            .kind(TypeKind::Struct)
            .generic_arg(&int32)
            .build()?;
        assert_eq!(render_type(&nullable, None)?, "int?");
        Ok(())
    }

    #[test]
    fn generic_type_with_backtick_arity() -> Result<()> {
        let module = module();
        let string = TypeBuilder::primitive(&module, PrimitiveKind::String);
        let list = TypeBuilder::new(&module, "List`1")
            .namespace("System.Collections.Generic")
            .external("mscorlib")
            .flags(TypeAttributes::PUBLIC)
            .generic_arg(&string)
            .build()?;
        assert_eq!(
            render_type(&list, None)?,
            "System.Collections.Generic.List<string>"
        );
        Ok(())
    }

    #[test]
    fn nested_generic_partitions_cumulative_arguments() -> Result<()> {
        let module = module();
        let t = TypeBuilder::generic_param(&module, "T");
        let u = TypeBuilder::generic_param(&module, "U");
        let outer = TypeBuilder::new(&module, "Outer`1")
            .namespace("Game.Core")
            .flags(TypeAttributes::PUBLIC)
            .generic_arg(&t)
            .build()?;
        let inner = TypeBuilder::new(&module, "Inner`1")
            .flags(TypeAttributes::NESTED_PUBLIC)
            .nested_in(&outer)
            .generic_arg(&t)
            .generic_arg(&u)
            .build()?;

        assert_eq!(render_type(&inner, None)?, "Game.Core.Outer<T>.Inner<U>");
        Ok(())
    }

    #[test]
    fn namespace_context_shortens_matching_types() -> Result<()> {
        let module = module();
        let widget = TypeBuilder::new(&module, "Widget")
            .namespace("Game.Ui")
            .flags(TypeAttributes::PUBLIC)
            .build()?;
        assert_eq!(render_type(&widget, Some("Game.Ui"))?, "Widget");
        assert_eq!(render_type(&widget, Some("Game"))?, "Game.Ui.Widget");
        Ok(())
    }

    #[test]
    fn method_declaration_with_out_and_ref_parameters() -> Result<()> {
        let module = module();
        let void = TypeBuilder::primitive(&module, PrimitiveKind::Void);
        let int32 = TypeBuilder::primitive(&module, PrimitiveKind::I4);
        let ty = TypeBuilder::new(&module, "Calc")
            .namespace("Game")
            .flags(TypeAttributes::PUBLIC)
            .build()?;
        let method = MethodBuilder::new(&module, "TryAdd", &ty, &void)
            .param("a", &int32)
            .ref_param("b", &int32)
            .out_param("sum", &int32)
            .build();

        assert_eq!(
            render_method(&method, false, false, None, false)?,
            "public void TryAdd(int a, ref int b, out int sum)"
        );
        assert_eq!(
            render_method(&method, true, false, None, false)?,
            "TryAdd(a, ref b, out sum)"
        );
        Ok(())
    }

    #[test]
    fn constructor_strips_arity_marker() -> Result<()> {
        let module = module();
        let t = TypeBuilder::generic_param(&module, "T");
        let ty = TypeBuilder::new(&module, "Holder`1")
            .namespace("Game")
            .flags(TypeAttributes::PUBLIC)
            .generic_arg(&t)
            .build()?;
        let ctor = std::sync::Arc::new(crate::metadata::member::Constructor {
            token: module.next_token(),
            flags: 0,
            markers: crate::metadata::markers::MarkerFlags::empty(),
            declaring: TypeLink::new(&ty),
            params: Vec::new(),
        });
        assert_eq!(render_constructor(&ctor, None)?, "public Holder()");
        Ok(())
    }
}
