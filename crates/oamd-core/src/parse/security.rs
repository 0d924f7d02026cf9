use serde::Deserialize;

/// A security scheme definition. `type` is kept as written (`apiKey`,
/// `http`, `oauth2`, ...) since it is rendered verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,

    pub description: Option<String>,

    /// Header, query or cookie name for `apiKey` schemes.
    pub name: Option<String>,

    #[serde(rename = "in")]
    pub location: Option<String>,

    pub scheme: Option<String>,

    #[serde(rename = "bearerFormat")]
    pub bearer_format: Option<String>,
}
