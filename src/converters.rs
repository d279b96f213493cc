//! The closed catalogue of native-type conversion rules.
//!
//! Each converter describes how values of one native type are represented at
//! every stage of crossing the native/managed boundary, plus the code snippets
//! that move a value between stages. The registry is built once and never
//! mutated; adding support for a new native type means adding one entry to
//! the table at the bottom.

use std::collections::HashMap;

use lazy_static::lazy_static;

pub trait TypeConverter: Sync {
    /// Type the generated C# property exposes to callers.
    fn managed_exposed_type(&self) -> &'static str;
    /// Type used in the generated `DllImport` signature.
    fn managed_glue_type(&self) -> &'static str;
    /// Type the generated native glue function traffics in.
    fn native_glue_type(&self) -> &'static str;
    /// Whether written values cross the boundary behind a pointer.
    fn pass_by_ref(&self) -> bool {
        false
    }

    /// C++ expression turning `var_access` (the real accessor call or field
    /// access) into the glue representation.
    fn native_to_glue(&self, var_access: &str) -> String;
    /// C++ expression turning the glue-typed `value` back into the native
    /// representation, used by generated setters.
    fn glue_to_native(&self, value: &str) -> String;
    /// C# statement block for the getter body; `ret_val` names the local
    /// holding the raw glue value.
    fn glue_to_managed(&self, ret_val: &str) -> String;
    /// C# expression turning the property's incoming `value` into the glue
    /// representation, or `None` if writes of this type are unsupported.
    fn managed_to_glue(&self, _value: &str) -> Option<String> {
        None
    }
}

/// Identity conversion for primitives that share a representation on both
/// sides of the boundary.
struct PassthroughConverter {
    managed_type: &'static str,
    native_type: &'static str,
}

impl TypeConverter for PassthroughConverter {
    fn managed_exposed_type(&self) -> &'static str {
        self.managed_type
    }

    fn managed_glue_type(&self) -> &'static str {
        self.managed_type
    }

    fn native_glue_type(&self) -> &'static str {
        self.native_type
    }

    fn native_to_glue(&self, var_access: &str) -> String {
        var_access.to_owned()
    }

    fn glue_to_native(&self, value: &str) -> String {
        value.to_owned()
    }

    fn glue_to_managed(&self, ret_val: &str) -> String {
        format!("return {ret_val};")
    }

    fn managed_to_glue(&self, value: &str) -> Option<String> {
        Some(value.to_owned())
    }
}

/// C++ `bool` is one byte; the extern signature uses `byte` so the default
/// four-byte `UnmanagedType.Bool` marshalling never comes into play.
struct BoolConverter;

impl TypeConverter for BoolConverter {
    fn managed_exposed_type(&self) -> &'static str {
        "bool"
    }

    fn managed_glue_type(&self) -> &'static str {
        "byte"
    }

    fn native_glue_type(&self) -> &'static str {
        "bool"
    }

    fn native_to_glue(&self, var_access: &str) -> String {
        var_access.to_owned()
    }

    fn glue_to_native(&self, value: &str) -> String {
        value.to_owned()
    }

    fn glue_to_managed(&self, ret_val: &str) -> String {
        format!("return {ret_val} != 0;")
    }

    fn managed_to_glue(&self, value: &str) -> Option<String> {
        Some(format!("(byte)({value} ? 1 : 0)"))
    }
}

/// Borrows the string owned by the native object; the pointer stays valid as
/// long as the object does, so the managed side copies and does not free.
struct StdStringConverter;

impl TypeConverter for StdStringConverter {
    fn managed_exposed_type(&self) -> &'static str {
        "string"
    }

    fn managed_glue_type(&self) -> &'static str {
        "IntPtr"
    }

    fn native_glue_type(&self) -> &'static str {
        "const char*"
    }

    fn native_to_glue(&self, var_access: &str) -> String {
        format!("{var_access}.c_str()")
    }

    fn glue_to_native(&self, value: &str) -> String {
        format!("std::string({value})")
    }

    fn glue_to_managed(&self, ret_val: &str) -> String {
        format!("return Marshal.PtrToStringUTF8({ret_val})!;")
    }
}

/// A `std::string_view` has no terminator of its own, so the glue function
/// materializes a copy that the managed side frees after converting.
struct StdStringViewConverter;

impl TypeConverter for StdStringViewConverter {
    fn managed_exposed_type(&self) -> &'static str {
        "string"
    }

    fn managed_glue_type(&self) -> &'static str {
        "IntPtr"
    }

    fn native_glue_type(&self) -> &'static str {
        "char*"
    }

    fn native_to_glue(&self, var_access: &str) -> String {
        format!("strdup(std::string({var_access}).c_str())")
    }

    fn glue_to_native(&self, value: &str) -> String {
        format!("std::string_view({value})")
    }

    fn glue_to_managed(&self, ret_val: &str) -> String {
        format!(
            "string t = Marshal.PtrToStringUTF8({ret_val})!;\n\
             Marshal.FreeHGlobal({ret_val});\n\
             return t;"
        )
    }
}

/// Three-component float vector, bitwise-compatible with the managed
/// `Vector3` struct. Returned by value, written through a pointer.
struct Vec3Converter;

impl TypeConverter for Vec3Converter {
    fn managed_exposed_type(&self) -> &'static str {
        "Vector3"
    }

    fn managed_glue_type(&self) -> &'static str {
        "Vector3"
    }

    fn native_glue_type(&self) -> &'static str {
        "glm::vec3"
    }

    fn pass_by_ref(&self) -> bool {
        true
    }

    fn native_to_glue(&self, var_access: &str) -> String {
        var_access.to_owned()
    }

    fn glue_to_native(&self, value: &str) -> String {
        format!("*{value}")
    }

    fn glue_to_managed(&self, ret_val: &str) -> String {
        format!("return {ret_val};")
    }

    fn managed_to_glue(&self, value: &str) -> Option<String> {
        Some(value.to_owned())
    }
}

static INT: PassthroughConverter = PassthroughConverter {
    managed_type: "int",
    native_type: "int",
};
static UINT32: PassthroughConverter = PassthroughConverter {
    managed_type: "uint",
    native_type: "uint32_t",
};
static FLOAT: PassthroughConverter = PassthroughConverter {
    managed_type: "float",
    native_type: "float",
};
static DOUBLE: PassthroughConverter = PassthroughConverter {
    managed_type: "double",
    native_type: "double",
};

lazy_static! {
    static ref CONVERTERS: HashMap<&'static str, &'static dyn TypeConverter> = {
        let mut map: HashMap<&'static str, &'static dyn TypeConverter> = HashMap::new();
        map.insert("int", &INT);
        map.insert("uint32_t", &UINT32);
        map.insert("float", &FLOAT);
        map.insert("double", &DOUBLE);
        map.insert("bool", &BoolConverter);
        map.insert("std::string", &StdStringConverter);
        map.insert("std::string_view", &StdStringViewConverter);
        map.insert("glm::vec3", &Vec3Converter);
        map
    };
}

/// Looks up the conversion rule for a native type by exact string match.
pub fn converter_for(native_type: &str) -> Option<&'static dyn TypeConverter> {
    CONVERTERS.get(native_type).copied()
}

/// The native type identifiers the registry knows about, in no particular
/// order.
pub fn registered_types() -> impl Iterator<Item = &'static str> {
    CONVERTERS.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_exact_string() {
        let converter = converter_for("int").unwrap();
        assert_eq!(converter.managed_exposed_type(), "int");
        assert_eq!(converter.managed_glue_type(), "int");
        assert_eq!(converter.native_glue_type(), "int");
        assert!(!converter.pass_by_ref());
    }

    #[test]
    fn unknown_types_are_not_found() {
        assert!(converter_for("std::vector<int>").is_none());
        assert!(converter_for("Int").is_none());
        assert!(converter_for("").is_none());
    }

    #[test]
    fn catalogue_is_closed_and_enumerable() {
        let mut types: Vec<_> = registered_types().collect();
        types.sort_unstable();
        assert_eq!(
            types,
            vec![
                "bool",
                "double",
                "float",
                "glm::vec3",
                "int",
                "std::string",
                "std::string_view",
                "uint32_t",
            ]
        );
    }

    #[test]
    fn string_view_round_trip_copies_and_frees() {
        let converter = converter_for("std::string_view").unwrap();
        assert_eq!(
            converter.native_to_glue("(inst->name())"),
            "strdup(std::string((inst->name())).c_str())"
        );
        let getter = converter.glue_to_managed("tmp");
        assert!(getter.contains("Marshal.PtrToStringUTF8(tmp)"));
        assert!(getter.contains("Marshal.FreeHGlobal(tmp)"));
    }

    #[test]
    fn owned_string_borrows_without_freeing() {
        let converter = converter_for("std::string").unwrap();
        assert_eq!(converter.native_to_glue("x"), "x.c_str()");
        assert!(!converter.glue_to_managed("tmp").contains("FreeHGlobal"));
    }

    #[test]
    fn strings_do_not_support_writes() {
        assert!(converter_for("std::string").unwrap().managed_to_glue("value").is_none());
        assert!(converter_for("std::string_view").unwrap().managed_to_glue("value").is_none());
    }

    #[test]
    fn vectors_cross_by_reference_on_writes() {
        let converter = converter_for("glm::vec3").unwrap();
        assert!(converter.pass_by_ref());
        assert_eq!(converter.glue_to_native("value"), "*value");
        assert_eq!(converter.managed_to_glue("value"), Some("value".into()));
    }

    #[test]
    fn bool_narrows_to_a_byte_at_the_boundary() {
        let converter = converter_for("bool").unwrap();
        assert_eq!(converter.managed_glue_type(), "byte");
        assert_eq!(converter.glue_to_managed("tmp"), "return tmp != 0;");
        assert_eq!(converter.managed_to_glue("value"), Some("(byte)(value ? 1 : 0)".into()));
    }
}
