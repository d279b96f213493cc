//! Native-side glue generator.
//!
//! Emits one exported thunk per exposed member. The `EXPORT` macro and the
//! engine headers come from the include declarations; the generated text is
//! handed to the native toolchain unverified.

use super::common::{resolve_members, ResolvedMember};
use super::CodegenError;
use crate::converters::TypeConverter;
use crate::model::{BindingFile, ExposedMember, ExposedType};

pub(super) fn generate(file: &BindingFile) -> Result<String, CodegenError> {
    let mut out = String::new();

    for include in &file.includes {
        out.push_str(&format!("#include \"{include}\"\n"));
    }
    if !file.includes.is_empty() {
        out.push('\n');
    }

    for ty in &file.types {
        let members = resolve_members(ty)?;
        for ResolvedMember { member, converter } in &members {
            match member {
                ExposedMember::Property(prop) => {
                    emit_getter(
                        &mut out,
                        ty,
                        *converter,
                        &prop.accessor_name(&ty.identifier),
                        &format!("{}()", prop.native_method_name),
                    );
                }
                ExposedMember::Field(field) => {
                    emit_getter(
                        &mut out,
                        ty,
                        *converter,
                        &field.getter_name(&ty.identifier),
                        &field.native_field_name,
                    );
                    if converter.managed_to_glue("value").is_some() {
                        emit_setter(
                            &mut out,
                            ty,
                            *converter,
                            &field.setter_name(&ty.identifier),
                            &field.native_field_name,
                        );
                    }
                }
            }
        }
    }

    Ok(out)
}

/// Parameter list addressing the instance: components go through the entity
/// registry, plain types through an instance pointer.
fn instance_params(ty: &ExposedType) -> String {
    if ty.is_component {
        "entt::registry* reg, entt::entity entity".to_owned()
    } else {
        format!("{}* inst", ty.identifier)
    }
}

/// Expression reaching `member_access` (a field name or a `method()` call)
/// on the addressed instance.
fn member_expr(ty: &ExposedType, member_access: &str) -> String {
    if ty.is_component {
        format!("(reg->get<{}>(entity)).{}", ty.identifier, member_access)
    } else {
        format!("(inst->{member_access})")
    }
}

fn emit_getter(
    out: &mut String,
    ty: &ExposedType,
    converter: &dyn TypeConverter,
    accessor_name: &str,
    member_access: &str,
) {
    out.push_str(&format!(
        "EXPORT {} {}({}) {{\n",
        converter.native_glue_type(),
        accessor_name,
        instance_params(ty)
    ));
    out.push_str(&format!(
        "    return {};\n",
        converter.native_to_glue(&member_expr(ty, member_access))
    ));
    out.push_str("}\n\n");
}

fn emit_setter(
    out: &mut String,
    ty: &ExposedType,
    converter: &dyn TypeConverter,
    accessor_name: &str,
    field_name: &str,
) {
    let value_param = if converter.pass_by_ref() {
        format!("const {}* value", converter.native_glue_type())
    } else {
        format!("{} value", converter.native_glue_type())
    };
    let lvalue = if ty.is_component {
        format!("reg->get<{}>(entity).{}", ty.identifier, field_name)
    } else {
        format!("inst->{field_name}")
    };

    out.push_str(&format!(
        "EXPORT void {}({}, {}) {{\n",
        accessor_name,
        instance_params(ty),
        value_param
    ));
    out.push_str(&format!(
        "    {} = {};\n",
        lvalue,
        converter.glue_to_native("value")
    ));
    out.push_str("}\n\n");
}
