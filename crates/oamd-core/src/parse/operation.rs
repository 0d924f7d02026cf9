use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;

/// Path item keys that hold an operation.
pub const OPERATION_KEYS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,

    pub summary: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBodyOrRef>,

    #[serde(default)]
    pub responses: IndexMap<String, ResponseOrRef>,

    pub deprecated: Option<bool>,
}

/// A path item. Operations are kept as `(method key, operation)` pairs in
/// the order they appear in the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub parameters: Vec<ParameterOrRef>,

    pub operations: Vec<(String, Operation)>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PathItemVisitor)
    }
}

struct PathItemVisitor;

impl<'de> Visitor<'de> for PathItemVisitor {
    type Value = PathItem;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an OpenAPI path item object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<PathItem, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut item = PathItem::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "parameters" => item.parameters = map.next_value()?,
                method if OPERATION_KEYS.contains(&method) => {
                    let op: Operation = map.next_value()?;
                    item.operations.push((key, op));
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(item)
    }
}
