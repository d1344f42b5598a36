//! The per-type emission state machine.
//!
//! [`TypeStripper::strip_start`] writes one compilable, declaration-only
//! C# compilation unit for a top-level type: warning pragma, optional
//! namespace wrapper, then the recursive type body. Method bodies are
//! synthesized as `default(...)` stubs so the output compiles without any
//! of the original method bodies.

use std::collections::HashSet;
use std::io::Write;

use crate::{
    metadata::{
        access,
        markers::MarkerFlags,
        member::{ConstructorRc, Member},
        token::Token,
        typesystem::{TypeKind, TypeRc},
    },
    strip::{classify, progress::StripProgress, signature, StripOptions},
    Result,
};

/// Platform-specific utility types that exist only in one platform's build
/// of the engine; stripping them would produce source that cannot compile
/// everywhere, so they are skipped entirely.
pub const IGNORED_TYPES: &[&str] = &[
    "Assets.Scripts.Platform.PC.PCPlatformUtil",
    "Assets.Scripts.Platform.OSX.OSXPlatformUtil",
    "Assets.Scripts.Platform.Linux.LinuxPlatformUtil",
    "Assets.Scripts.Platform.IOS.IOSPlatformUtil",
    "Assets.Scripts.Platform.PS4.PS4PlatformUtil",
];

/// Writes declaration-only C# for one type at a time.
pub struct TypeStripper<'a> {
    options: &'a StripOptions,
    progress: &'a StripProgress,
}

impl<'a> TypeStripper<'a> {
    /// Create a stripper bound to a run's options and progress channel.
    #[must_use]
    pub fn new(options: &'a StripOptions, progress: &'a StripProgress) -> Self {
        TypeStripper { options, progress }
    }

    /// Write one complete compilation unit for a top-level type.
    ///
    /// Member hiding and redeclaration warnings are expected in stripped
    /// output, so the pragma disables them up front (108: hides inherited
    /// member, 114: hides inherited virtual member, 618: obsolete member).
    pub fn strip_start<W: Write>(&self, ty: &TypeRc, writer: &mut W) -> Result<()> {
        writeln!(writer, "#pragma warning disable 108, 114, 618")?;
        match ty.namespace.as_deref() {
            Some(namespace) => {
                writeln!(writer, "namespace {namespace}")?;
                writeln!(writer, "{{")?;
                self.strip_type(ty, writer)?;
                writeln!(writer, "}}")?;
            }
            None => self.strip_type(ty, writer)?,
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the declaration of one type, recursing into nested types.
    pub fn strip_type<W: Write>(&self, ty: &TypeRc, writer: &mut W) -> Result<()> {
        if IGNORED_TYPES.contains(&ty.fullname().as_str()) || is_hidden_synthesized(ty) {
            return Ok(());
        }
        if ty.kind == TypeKind::Delegate {
            return self.strip_delegate(ty, writer);
        }

        let keyword = ty.kind.keyword();
        let mut inheritance = String::new();
        if !ty.kind.is_value_type() {
            if let Some(base) = ty.base() {
                if base.fullname() != "System.Object" {
                    inheritance.push_str(&signature::render_type(&base, None)?);
                }
            }
            // The interface list is the transitive set; interfaces already
            // declared by the base type must not be repeated.
            let base_interfaces: HashSet<Token> = match ty.base() {
                Some(base) => base
                    .interfaces
                    .iter()
                    .filter_map(|(_, link)| link.token())
                    .collect(),
                None => HashSet::new(),
            };
            for (_, link) in ty.interfaces.iter() {
                let interface = link.resolve()?;
                if base_interfaces.contains(&interface.token) {
                    continue;
                }
                if !inheritance.is_empty() {
                    inheritance.push_str(", ");
                }
                inheritance.push_str(&signature::render_type(&interface, None)?);
            }
        }
        if !inheritance.is_empty() {
            inheritance = format!(" : {inheritance}");
        }

        let mut modifiers = String::new();
        if ty.is_abstract() && ty.is_sealed() {
            modifiers.push_str("static ");
        } else if ty.kind != TypeKind::Interface && ty.is_abstract() {
            modifiers.push_str("abstract ");
        } else if !ty.kind.is_value_type() && ty.is_sealed() {
            modifiers.push_str("sealed ");
        }

        let is_component = ty.inherits_from(&self.options.component_base)?;
        if is_component
            && !ty.is_abstract()
            && !ty.is_sealed()
            && (ty.is_public() || ty.is_nested_public())
        {
            self.progress.add_component(ty.fullname().replace('+', "."));
        }

        let serializable = ty.markers.contains(MarkerFlags::SERIALIZABLE);
        if serializable {
            writeln!(writer, "[System.Serializable]")?;
        }
        write!(
            writer,
            "public {modifiers}{keyword} {}{inheritance}",
            signature::render_type_short(ty)?
        )?;

        if ty.kind == TypeKind::Enum {
            return strip_enum_body(ty, writer);
        }

        writeln!(writer, "{{")?;
        for (_, link) in ty.nested_types.iter() {
            self.strip_type(&link.resolve()?, writer)?;
        }
        self.strip_fields(ty, serializable, is_component, writer)?;
        let consumed = self.strip_properties(ty, writer)?;
        self.strip_methods(ty, &consumed, writer)?;
        self.strip_constructors(ty, writer)?;
        writeln!(writer, "}}")?;
        Ok(())
    }

    /// A delegate declaration is its `Invoke` method's signature with the
    /// modifier rewritten to `delegate` and the name replaced by the type's.
    fn strip_delegate<W: Write>(&self, ty: &TypeRc, writer: &mut W) -> Result<()> {
        let invoke = ty
            .members
            .iter()
            .find_map(|(_, member)| match member {
                Member::Method(method) if method.name == "Invoke" => Some(method.clone()),
                _ => None,
            })
            .ok_or_else(|| malformed_error!("Delegate {} has no Invoke method", ty.name))?;
        let text = signature::render_method(&invoke, false, false, None, false)?;
        writeln!(
            writer,
            "{};",
            text.replace("virtual", "delegate")
                .replace("Invoke", &signature::render_type_short(ty)?)
        )?;
        Ok(())
    }

    fn strip_fields<W: Write>(
        &self,
        ty: &TypeRc,
        serializable: bool,
        is_component: bool,
        writer: &mut W,
    ) -> Result<()> {
        let namespace = ty.namespace.as_deref();
        for (_, member) in ty.members.iter() {
            let Member::Field(field) = member else {
                continue;
            };
            if field.markers.contains(MarkerFlags::COMPILER_GENERATED) {
                continue;
            }
            // Unity serializes non-public fields of serializable/component
            // types into scene data; hiding them from the inspector keeps
            // the stubs from polluting editor UI without changing layout.
            let keeps_visible = field.markers.contains(MarkerFlags::KEEP_VISIBLE);
            let mut hidden = false;
            if self.options.strict_hiding
                && ((!field.is_public() && (serializable || is_component) && !keeps_visible)
                    || field.markers.contains(MarkerFlags::FORCE_HIDDEN))
            {
                if !keeps_visible {
                    hidden = true;
                }
                writeln!(writer, "[UnityEngine.HideInInspector]")?;
            }
            if !hidden && keeps_visible {
                writeln!(writer, "[UnityEngine.SerializeField]")?;
            }
            if field.markers.contains(MarkerFlags::NON_SERIALIZED) {
                writeln!(writer, "[System.NonSerialized]")?;
            }
            let field_type = field.ty.resolve()?;
            // Declared access, capped at the visibility of the field type so
            // the stub never exposes an inaccessible type.
            let access = field
                .declared_access()
                .min(access::of(&field_type, ty))
                .keyword();
            let static_text = if field.is_static() { "static " } else { "" };
            writeln!(
                writer,
                "{access} {static_text}{} {};",
                signature::render_type(&field_type, namespace)?,
                field.name
            )?;
        }
        Ok(())
    }

    /// Emit property declarations; returns the tokens of every accessor
    /// method consumed so the method pass skips them.
    fn strip_properties<W: Write>(
        &self,
        ty: &TypeRc,
        writer: &mut W,
    ) -> Result<HashSet<Token>> {
        let namespace = ty.namespace.as_deref();
        let is_interface = ty.kind == TypeKind::Interface;
        let mut consumed = HashSet::new();
        for (_, member) in ty.members.iter() {
            let Member::Property(property) = member else {
                continue;
            };
            if property.markers.contains(MarkerFlags::COMPILER_GENERATED) {
                continue;
            }
            let property_type = property.ty.resolve()?;
            let property_type_text = signature::render_type(&property_type, namespace)?;
            let lead = property
                .getter
                .as_ref()
                .or(property.setter.as_ref())
                .ok_or_else(|| {
                    malformed_error!("Property {} has neither getter nor setter", property.name)
                })?;
            let is_abstract = lead.is_abstract() && !lead.is_final();
            let is_virtual = lead.is_virtual() && !lead.is_final();
            let is_override = !lead.is_slot_owner();
            let access_text = classify::access_modifier_text(lead)?;

            let mut rendered_name = property.name.clone();
            if classify::is_indexer(property)? {
                // Rebuild the indexer parameter list from the accessor
                // signature: everything from the accessor name on, with the
                // metadata name rewritten to C# indexer syntax.
                rendered_name = if let Some(getter) = &property.getter {
                    let text = signature::render_method(getter, false, false, None, false)?;
                    let index = text.find("get_Item").ok_or_else(|| {
                        malformed_error!("Indexer getter of {} lost its accessor name", ty.name)
                    })?;
                    text[index..].replace("get_Item(", "this[").replace(')', "]")
                } else {
                    let setter = property.setter.as_ref().ok_or_else(|| {
                        malformed_error!("Property {} has neither getter nor setter", property.name)
                    })?;
                    let text = signature::render_method(setter, false, true, None, false)?;
                    let index = text.find("set_Item").ok_or_else(|| {
                        malformed_error!("Indexer setter of {} lost its accessor name", ty.name)
                    })?;
                    text[index..].replace("set_Item(", "this[").replace(')', "]")
                };
            }

            // Explicit interface implementations carry the dotted interface
            // name and must not repeat an access modifier.
            let access_part = if !is_interface && !property.name.contains('.') {
                access_text.as_str()
            } else {
                ""
            };
            let modifier_part = if is_interface {
                ""
            } else if is_abstract {
                "abstract "
            } else if is_override {
                "override "
            } else if is_virtual {
                "virtual "
            } else {
                ""
            };
            let static_part = if lead.is_static() { "static " } else { "" };
            writeln!(
                writer,
                "{access_part}{modifier_part}{static_part}{property_type_text} {rendered_name}"
            )?;
            writeln!(writer, "{{")?;
            if let Some(getter) = &property.getter {
                consumed.insert(getter.token);
                if is_abstract {
                    writeln!(writer, "get;")?;
                } else {
                    writeln!(writer, "get {{return default({property_type_text});}}")?;
                }
            }
            if let Some(setter) = &property.setter {
                consumed.insert(setter.token);
                if is_abstract {
                    writeln!(writer, "set;")?;
                } else {
                    writeln!(writer, "set {{}}")?;
                }
            }
            writeln!(writer, "}}")?;
        }
        Ok(consumed)
    }

    fn strip_methods<W: Write>(
        &self,
        ty: &TypeRc,
        consumed: &HashSet<Token>,
        writer: &mut W,
    ) -> Result<()> {
        let namespace = ty.namespace.as_deref();
        for (_, member) in ty.members.iter() {
            let Member::Method(method) = member else {
                continue;
            };
            if consumed.contains(&method.token)
                || method.markers.contains(MarkerFlags::COMPILER_GENERATED)
            {
                continue;
            }
            if classify::is_finalizer(method)? {
                let mut name = ty.name.clone();
                if let Some(index) = name.find('`') {
                    name.truncate(index);
                }
                writeln!(writer, "~{name}() {{}}")?;
                continue;
            }

            let mut text = signature::render_method(
                method,
                false,
                false,
                namespace,
                method.name.contains('.'),
            )?;
            if classify::is_conversion_operator(method) {
                text = classify::rewrite_conversion_operator(&text, method);
            }
            write!(writer, "{text}")?;
            if ty.kind == TypeKind::Interface || (method.is_abstract() && !method.is_final()) {
                writeln!(writer, ";")?;
                continue;
            }

            writeln!(writer, "{{")?;
            for param in method.params.iter().filter(|param| param.is_out) {
                let element = param.ty.resolve()?;
                writeln!(
                    writer,
                    "{} = default({});",
                    param.name,
                    signature::render_type(&element, namespace)?
                )?;
            }
            let return_type = method.return_type.resolve()?;
            if !return_type.is_void() {
                writeln!(
                    writer,
                    "return default({});",
                    signature::render_type(&return_type, namespace)?
                )?;
            }
            writeln!(writer, "}}")?;
        }
        Ok(())
    }

    /// Emit constructor stubs. Instance constructors of value types chain
    /// to `this()`; classes with a constructible base chain to `base(...)`
    /// with `default` arguments for its least-demanding constructor.
    fn strip_constructors<W: Write>(&self, ty: &TypeRc, writer: &mut W) -> Result<()> {
        let namespace = ty.namespace.as_deref();
        let base_ctor = ty.base().and_then(|base| fewest_parameter_constructor(&base));
        for (_, member) in ty.members.iter() {
            let Member::Constructor(ctor) = member else {
                continue;
            };
            if ctor.markers.contains(MarkerFlags::COMPILER_GENERATED) {
                continue;
            }
            write!(writer, "{}", signature::render_constructor(ctor, namespace)?)?;
            if ty.kind.is_value_type() && !ctor.is_static() {
                writeln!(writer, " : this()")?;
            } else {
                match base_ctor.as_ref() {
                    Some(base_ctor) if ty.kind == TypeKind::Class && !ctor.is_static() => {
                        let mut defaults = Vec::with_capacity(base_ctor.params.len());
                        for param in &base_ctor.params {
                            defaults.push(format!(
                                "default({})",
                                signature::render_type(&param.ty.resolve()?, namespace)?
                            ));
                        }
                        writeln!(writer, " : base({})", defaults.join(", "))?;
                    }
                    _ => writeln!(writer)?,
                }
            }
            writeln!(writer, "{{")?;
            writeln!(writer, "}}")?;
        }
        Ok(())
    }
}

/// Nested compiler-generated types (closures, iterator state machines) are
/// omitted unless the enclosing type is itself compiler-generated;
/// delegates are exempt.
fn is_hidden_synthesized(ty: &TypeRc) -> bool {
    ty.is_nested()
        && ty.markers.contains(MarkerFlags::COMPILER_GENERATED)
        && ty.kind != TypeKind::Delegate
        && ty
            .declaring()
            .is_some_and(|outer| !outer.markers.contains(MarkerFlags::COMPILER_GENERATED))
}

fn strip_enum_body<W: Write>(ty: &TypeRc, writer: &mut W) -> Result<()> {
    let underlying = ty
        .enum_underlying()
        .ok_or_else(|| malformed_error!("Enum {} has no underlying type", ty.name))?;
    writeln!(writer, ": {}", signature::qualified_name(&underlying, false))?;
    writeln!(writer, "{{")?;
    for (_, member) in ty.members.iter() {
        let Member::Field(field) = member else {
            continue;
        };
        if let Some(value) = field.literal {
            writeln!(writer, "{} = {value},", field.name)?;
        }
    }
    writeln!(writer, "}}")?;
    Ok(())
}

fn fewest_parameter_constructor(ty: &TypeRc) -> Option<ConstructorRc> {
    let mut best: Option<ConstructorRc> = None;
    for (_, member) in ty.members.iter() {
        let Member::Constructor(ctor) = member else {
            continue;
        };
        if ctor.is_static() {
            continue;
        }
        // Ties keep the earliest declared constructor
        match &best {
            Some(current) if current.params.len() <= ctor.params.len() => {}
            _ => best = Some(ctor.clone()),
        }
    }
    best
}
