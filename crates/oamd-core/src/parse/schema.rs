use indexmap::IndexMap;
use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;

/// The `type` field can be a single type or an array of types. Kept as
/// strings so unknown type names still render as written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

impl TypeSet {
    /// The type keyword as written, with type arrays joined by `" | "`.
    pub fn label(&self) -> String {
        match self {
            TypeSet::Single(t) => t.clone(),
            TypeSet::Multiple(ts) => ts.join(" | "),
        }
    }
}

/// A reference, an inline schema, or a boolean schema (`true` accepts
/// anything, `false` nothing).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
    Bool(bool),
}

impl SchemaOrRef {
    /// Display type for a property: the `type` keyword, the referenced
    /// component name for a `$ref`, or `any`.
    pub fn type_label(&self) -> String {
        match self {
            SchemaOrRef::Ref { ref_path } => ref_name(ref_path).to_string(),
            SchemaOrRef::Schema(schema) => schema
                .schema_type
                .as_ref()
                .map(TypeSet::label)
                .unwrap_or_else(|| "any".to_string()),
            SchemaOrRef::Bool(_) => "any".to_string(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Schema(schema) => schema.description.as_deref(),
            _ => None,
        }
    }
}

/// Last segment of a `$ref` path, e.g. `Pet` for `#/components/schemas/Pet`.
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// A JSON Schema object, reduced to what the renderers read.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<TypeSet>,

    pub description: Option<String>,

    // Object properties
    #[serde(default)]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, deserialize_with = "required_names")]
    pub required: Vec<String>,

    // Composition
    #[serde(rename = "allOf", default)]
    pub all_of: Vec<SchemaOrRef>,

    // Enum values
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,

    pub example: Option<serde_json::Value>,
}

/// Reads `required` as a list of property names. Any other shape, such as a
/// per-property `required: true`, is ignored.
fn required_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Required {
        Names(Vec<String>),
        Other(IgnoredAny),
    }

    Ok(match Required::deserialize(deserializer)? {
        Required::Names(names) => names,
        Required::Other(_) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_labels() {
        let single: SchemaOrRef = serde_json::from_str(r#"{"type": "string"}"#).unwrap();
        assert_eq!(single.type_label(), "string");

        let multiple: SchemaOrRef =
            serde_json::from_str(r#"{"type": ["string", "null"]}"#).unwrap();
        assert_eq!(multiple.type_label(), "string | null");

        let reference: SchemaOrRef =
            serde_json::from_str(r##"{"$ref": "#/components/schemas/Pet"}"##).unwrap();
        assert_eq!(reference.type_label(), "Pet");

        let untyped: SchemaOrRef = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        assert_eq!(untyped.type_label(), "any");
        assert_eq!(untyped.description(), Some("x"));

        let boolean: SchemaOrRef = serde_json::from_str("true").unwrap();
        assert_eq!(boolean, SchemaOrRef::Bool(true));
        assert_eq!(boolean.type_label(), "any");
        assert_eq!(boolean.description(), None);
    }

    #[test]
    fn test_required_ignores_non_list() {
        let schema: Schema =
            serde_json::from_str(r#"{"type": "string", "required": true}"#).unwrap();
        assert!(schema.required.is_empty());

        let schema: Schema = serde_json::from_str(r#"{"required": ["id", "name"]}"#).unwrap();
        assert_eq!(schema.required, vec!["id".to_string(), "name".to_string()]);
    }

    #[test]
    fn test_ref_name() {
        assert_eq!(ref_name("#/components/schemas/Pet"), "Pet");
        assert_eq!(ref_name("Pet"), "Pet");
    }
}
