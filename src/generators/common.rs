use super::CodegenError;
use crate::converters::{converter_for, TypeConverter};
use crate::model::{ExposedMember, ExposedType};

pub(super) struct ResolvedMember<'a> {
    pub(super) member: &'a ExposedMember,
    pub(super) converter: &'static dyn TypeConverter,
}

impl std::fmt::Debug for ResolvedMember<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedMember")
            .field("member", &self.member)
            .field("converter", &self.converter.managed_exposed_type())
            .finish()
    }
}

/// Resolves the converter of every member up front, before a single line is
/// emitted for the type. An unresolved native type therefore aborts the unit
/// without leaving partial glue behind.
pub(super) fn resolve_members(ty: &ExposedType) -> Result<Vec<ResolvedMember<'_>>, CodegenError> {
    ty.members
        .iter()
        .map(|member| {
            let converter = converter_for(member.native_type()).ok_or_else(|| {
                CodegenError::UnknownNativeType {
                    native_type: member.native_type().to_owned(),
                    member: member.exposed_name().to_owned(),
                    type_identifier: ty.identifier.to_string(),
                }
            })?;
            Ok(ResolvedMember { member, converter })
        })
        .collect()
}

/// Prefixes every non-empty line of a multi-line snippet, keeping converter
/// snippets indentation-agnostic.
pub(super) fn indent(snippet: &str, prefix: &str) -> String {
    snippet
        .lines()
        .map(|line| {
            if line.is_empty() {
                line.to_owned()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExposedProperty, QualifiedIdentifier};

    fn type_with_native_types(native_types: &[&str]) -> ExposedType {
        ExposedType {
            identifier: QualifiedIdentifier::new(vec!["Foo".into()]),
            is_component: false,
            members: native_types
                .iter()
                .enumerate()
                .map(|(i, native_type)| {
                    ExposedMember::Property(ExposedProperty {
                        exposed_name: format!("P{i}"),
                        native_method_name: format!("get{i}"),
                        native_type: native_type.to_string(),
                    })
                })
                .collect(),
        }
    }

    #[test]
    fn resolves_every_member() {
        let ty = type_with_native_types(&["int", "std::string", "glm::vec3"]);
        assert_eq!(resolve_members(&ty).unwrap().len(), 3);
    }

    #[test]
    fn first_unresolved_member_wins() {
        let ty = type_with_native_types(&["int", "nope", "also_nope"]);
        let err = resolve_members(&ty).unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnknownNativeType {
                native_type: "nope".into(),
                member: "P1".into(),
                type_identifier: "Foo".into(),
            }
        );
    }

    #[test]
    fn indents_only_non_empty_lines() {
        assert_eq!(indent("a\n\nb", "  "), "  a\n\n  b");
    }
}
