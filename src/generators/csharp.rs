//! Managed-side proxy generator.
//!
//! Emits one C# class per exposed type: an opaque native handle, a
//! constructor taking it, and per member a `DllImport` declaration against
//! the mangled accessor name plus a typed property marshalling through the
//! member's converter.

use super::common::{indent, resolve_members, ResolvedMember};
use super::CodegenError;
use crate::converters::TypeConverter;
use crate::model::{BindingFile, ExposedMember, ExposedType};

const USINGS: &str = "using System;\nusing System.Runtime.InteropServices;\n\n";

pub(super) fn generate(file: &BindingFile) -> Result<String, CodegenError> {
    let mut out = String::from(USINGS);

    for ty in &file.types {
        let members = resolve_members(ty)?;
        emit_class(&mut out, ty, &members);
    }

    Ok(out)
}

/// Extern parameter list matching the native thunk's instance parameters.
fn extern_params(ty: &ExposedType) -> &'static str {
    if ty.is_component {
        "IntPtr reg, uint entity"
    } else {
        "IntPtr inst"
    }
}

/// Arguments the proxy passes for those parameters.
fn call_args(ty: &ExposedType) -> &'static str {
    if ty.is_component {
        "registry, entity"
    } else {
        "nativeInstance"
    }
}

fn emit_class(out: &mut String, ty: &ExposedType, members: &[ResolvedMember<'_>]) {
    let name = ty.identifier.name();
    out.push_str(&format!("class {name}\n{{\n"));

    if ty.is_component {
        out.push_str("    private IntPtr registry;\n");
        out.push_str("    private uint entity;\n\n");
        out.push_str(&format!("    public {name}(IntPtr registry, uint entity)\n"));
        out.push_str("    {\n");
        out.push_str("        this.registry = registry;\n");
        out.push_str("        this.entity = entity;\n");
        out.push_str("    }\n");
    } else {
        out.push_str("    private IntPtr nativeInstance;\n\n");
        out.push_str(&format!("    public {name}(IntPtr instance)\n"));
        out.push_str("    {\n");
        out.push_str("        nativeInstance = instance;\n");
        out.push_str("    }\n");
    }

    for ResolvedMember { member, converter } in members {
        match member {
            ExposedMember::Property(prop) => {
                let accessor = prop.accessor_name(&ty.identifier);
                emit_extern_getter(out, ty, *converter, &accessor);
                emit_property_open(out, *converter, &prop.exposed_name);
                emit_get_block(out, ty, *converter, &accessor);
                out.push_str("    }\n");
            }
            ExposedMember::Field(field) => {
                let getter = field.getter_name(&ty.identifier);
                let setter = field.setter_name(&ty.identifier);
                let writable = converter.managed_to_glue("value").is_some();

                emit_extern_getter(out, ty, *converter, &getter);
                if writable {
                    emit_extern_setter(out, ty, *converter, &setter);
                }
                emit_property_open(out, *converter, &field.exposed_name);
                emit_get_block(out, ty, *converter, &getter);
                if writable {
                    emit_set_block(out, ty, *converter, &setter);
                }
                out.push_str("    }\n");
            }
        }
    }

    out.push_str("}\n\n");
}

fn emit_extern_getter(out: &mut String, ty: &ExposedType, converter: &dyn TypeConverter, accessor: &str) {
    out.push_str("\n    [DllImport(Engine.NativeModule)]\n");
    out.push_str(&format!(
        "    private static extern {} {}({});\n",
        converter.managed_glue_type(),
        accessor,
        extern_params(ty)
    ));
}

fn emit_extern_setter(out: &mut String, ty: &ExposedType, converter: &dyn TypeConverter, accessor: &str) {
    let value_param = if converter.pass_by_ref() {
        format!("ref {} value", converter.managed_glue_type())
    } else {
        format!("{} value", converter.managed_glue_type())
    };
    out.push_str("    [DllImport(Engine.NativeModule)]\n");
    out.push_str(&format!(
        "    private static extern void {}({}, {});\n",
        accessor,
        extern_params(ty),
        value_param
    ));
}

fn emit_property_open(out: &mut String, converter: &dyn TypeConverter, exposed_name: &str) {
    out.push_str(&format!(
        "\n    public {} {}\n    {{\n",
        converter.managed_exposed_type(),
        exposed_name
    ));
}

fn emit_get_block(out: &mut String, ty: &ExposedType, converter: &dyn TypeConverter, accessor: &str) {
    out.push_str("        get\n        {\n");
    out.push_str(&format!(
        "            {} tmp = {}({});\n",
        converter.managed_glue_type(),
        accessor,
        call_args(ty)
    ));
    out.push_str(&indent(&converter.glue_to_managed("tmp"), "            "));
    out.push_str("\n        }\n");
}

fn emit_set_block(out: &mut String, ty: &ExposedType, converter: &dyn TypeConverter, accessor: &str) {
    // Callers check writability before emitting a setter.
    let glue_value = converter
        .managed_to_glue("value")
        .expect("setter emitted for write-unsupported converter");

    out.push_str("        set\n        {\n");
    if converter.pass_by_ref() {
        out.push_str(&format!(
            "            {} tmp = {};\n",
            converter.managed_glue_type(),
            glue_value
        ));
        out.push_str(&format!(
            "            {}({}, ref tmp);\n",
            accessor,
            call_args(ty)
        ));
    } else {
        out.push_str(&format!(
            "            {}({}, {});\n",
            accessor,
            call_args(ty),
            glue_value
        ));
    }
    out.push_str("        }\n");
}
