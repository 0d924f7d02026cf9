use serde::Deserialize;

/// A response definition. Only the description is rendered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    pub description: Option<String>,
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}
