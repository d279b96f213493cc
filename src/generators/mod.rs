mod common;
mod cpp;
mod csharp;

use thiserror::Error;

use crate::model::BindingFile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error(
        "no type converter registered for native type `{native_type}` \
         (member `{member}` of `{type_identifier}`)"
    )]
    UnknownNativeType {
        native_type: String,
        member: String,
        type_identifier: String,
    },
}

/// Emits the native-side glue fragment: one exported accessor function per
/// exposed member, in declaration order.
pub fn generate_native_glue(file: &BindingFile) -> Result<String, CodegenError> {
    cpp::generate(file)
}

/// Emits the managed-side proxy fragment: one class per exposed type, backed
/// by `DllImport` declarations against the mangled accessor names.
pub fn generate_managed_proxies(file: &BindingFile) -> Result<String, CodegenError> {
    csharp::generate(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    fn parse(source: &str) -> BindingFile {
        Parser::new(tokenize(source).unwrap()).parse().unwrap()
    }

    #[test]
    fn unknown_native_type_fails_both_generators() {
        let file = parse("nativetype Foo { method std::wstring getName() -> property Name; }");
        let expected = CodegenError::UnknownNativeType {
            native_type: "std::wstring".into(),
            member: "Name".into(),
            type_identifier: "Foo".into(),
        };
        assert_eq!(generate_native_glue(&file).unwrap_err(), expected);
        assert_eq!(generate_managed_proxies(&file).unwrap_err(), expected);
    }

    #[test]
    fn generation_order_follows_declaration_order() {
        let file = parse(
            "nativetype A { method int getA() -> property AValue; }\n\
             nativetype B { method int getB() -> property BValue; }\n\
             nativetype C { method int getC() -> property CValue; }",
        );

        for text in [
            generate_native_glue(&file).unwrap(),
            generate_managed_proxies(&file).unwrap(),
        ] {
            let a = text.find("A_getA").unwrap();
            let b = text.find("B_getB").unwrap();
            let c = text.find("C_getC").unwrap();
            assert!(a < b && b < c);
        }
    }

    #[test]
    fn output_is_deterministic_for_identical_input() {
        let file = parse(
            "nativecomponent worlds::RigidBody {\n\
             field float mass -> property Mass;\n\
             field glm::vec3 velocity -> property Velocity;\n\
             }",
        );
        assert_eq!(
            generate_native_glue(&file).unwrap(),
            generate_native_glue(&file).unwrap()
        );
        assert_eq!(
            generate_managed_proxies(&file).unwrap(),
            generate_managed_proxies(&file).unwrap()
        );
    }
}
