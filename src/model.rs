//! Semantic model of a binding definition file, produced by the parser and
//! consumed read-only by both generators.

use std::fmt;

/// A possibly-namespaced name such as `worlds::GameProject`.
///
/// Always holds at least one segment; the last segment is the bare name and
/// everything before it is the namespace path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedIdentifier {
    segments: Vec<String>,
}

impl QualifiedIdentifier {
    pub fn new(segments: Vec<String>) -> Self {
        assert!(!segments.is_empty(), "qualified identifier needs a name");
        Self { segments }
    }

    pub fn name(&self) -> &str {
        self.segments.last().unwrap()
    }

    pub fn namespace_path(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Flattens the identifier into something usable as a C function name by
    /// replacing every `::` with `__`.
    pub fn mangled(&self) -> String {
        self.segments.join("__")
    }
}

impl fmt::Display for QualifiedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

/// A getter-only accessor: the native side reaches it by calling
/// `native_method_name()` with no arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposedProperty {
    pub exposed_name: String,
    pub native_method_name: String,
    pub native_type: String,
}

impl ExposedProperty {
    /// Name of the exported glue function backing this property.
    pub fn accessor_name(&self, type_identifier: &QualifiedIdentifier) -> String {
        format!("{}_{}", type_identifier.mangled(), self.native_method_name)
    }
}

/// A directly addressable native field, exposed through a get/set pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposedField {
    pub exposed_name: String,
    pub native_field_name: String,
    pub native_type: String,
}

impl ExposedField {
    pub fn getter_name(&self, type_identifier: &QualifiedIdentifier) -> String {
        format!("{}_get_{}", type_identifier.mangled(), self.native_field_name)
    }

    pub fn setter_name(&self, type_identifier: &QualifiedIdentifier) -> String {
        format!("{}_set_{}", type_identifier.mangled(), self.native_field_name)
    }
}

/// One member exposed by a native type. Matched exhaustively by the
/// generators so a new member kind cannot be silently skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExposedMember {
    Property(ExposedProperty),
    Field(ExposedField),
}

impl ExposedMember {
    pub fn exposed_name(&self) -> &str {
        match self {
            ExposedMember::Property(p) => &p.exposed_name,
            ExposedMember::Field(f) => &f.exposed_name,
        }
    }

    pub fn native_type(&self) -> &str {
        match self {
            ExposedMember::Property(p) => &p.native_type,
            ExposedMember::Field(f) => &f.native_type,
        }
    }
}

/// One native type being bound, immutable once parsing completes.
///
/// Component types participate in the engine's entity registry and are
/// addressed by `(registry, entity)` instead of an instance pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposedType {
    pub identifier: QualifiedIdentifier,
    pub is_component: bool,
    pub members: Vec<ExposedMember>,
}

/// Root of a compilation unit. Both lists keep declaration order, which fixes
/// the order generated artifacts are emitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingFile {
    pub includes: Vec<String>,
    pub types: Vec<ExposedType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qualified(segments: &[&str]) -> QualifiedIdentifier {
        QualifiedIdentifier::new(segments.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn canonical_form_joins_with_double_colons() {
        assert_eq!(qualified(&["worlds", "GameProject"]).to_string(), "worlds::GameProject");
        assert_eq!(qualified(&["Thing"]).to_string(), "Thing");
    }

    #[test]
    fn splits_namespace_path_and_name() {
        let id = qualified(&["a", "b", "Widget"]);
        assert_eq!(id.name(), "Widget");
        assert_eq!(id.namespace_path(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn mangling_is_deterministic() {
        let id = qualified(&["worlds", "GameProject"]);
        assert_eq!(id.mangled(), "worlds__GameProject");
        assert_eq!(id.mangled(), qualified(&["worlds", "GameProject"]).mangled());
    }

    #[test]
    fn distinct_identifiers_mangle_distinctly() {
        let ids = [
            qualified(&["Foo"]),
            qualified(&["Foo", "Bar"]),
            qualified(&["Foo", "Bar", "Baz"]),
            qualified(&["foo", "bar"]),
        ];
        for (i, a) in ids.iter().enumerate() {
            for (j, b) in ids.iter().enumerate() {
                assert_eq!(i == j, a.mangled() == b.mangled());
            }
        }
    }

    #[test]
    fn property_accessor_name_uses_mangled_type() {
        let prop = ExposedProperty {
            exposed_name: "Value".into(),
            native_method_name: "getValue".into(),
            native_type: "int".into(),
        };
        assert_eq!(prop.accessor_name(&qualified(&["Foo", "Bar"])), "Foo__Bar_getValue");
    }

    #[test]
    fn field_accessors_form_a_get_set_pair() {
        let field = ExposedField {
            exposed_name: "Health".into(),
            native_field_name: "health".into(),
            native_type: "int".into(),
        };
        let id = qualified(&["worlds", "RigidBody"]);
        assert_eq!(field.getter_name(&id), "worlds__RigidBody_get_health");
        assert_eq!(field.setter_name(&id), "worlds__RigidBody_set_health");
    }
}
