use serde::Serialize;

use super::operations::IrOperation;
use super::schemas::IrSchema;

/// A fully resolved, renderer-ready view of an OpenAPI document.
#[derive(Debug, Clone, Serialize)]
pub struct IrSpec {
    pub info: IrInfo,
    pub servers: Vec<IrServer>,
    pub security_schemes: Vec<IrSecurityScheme>,
    pub tags: Vec<IrTag>,
    pub schemas: Vec<IrSchema>,
    pub operations: Vec<IrOperation>,
    pub groups: Vec<IrGroup>,
}

impl IrSpec {
    /// Operations of a group, in document order.
    pub fn group_operations<'a>(
        &'a self,
        group: &'a IrGroup,
    ) -> impl Iterator<Item = &'a IrOperation> + 'a {
        group
            .operations
            .iter()
            .filter_map(move |&i| self.operations.get(i))
    }

    /// Description of a top-level tag, if the document declares one.
    pub fn tag_description(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .and_then(|t| t.description.as_deref())
    }
}

/// API metadata.
#[derive(Debug, Clone, Serialize)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub license: Option<IrLicense>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IrLicense {
    pub name: String,
    pub url: Option<String>,
}

/// A server URL.
#[derive(Debug, Clone, Serialize)]
pub struct IrServer {
    pub url: String,
    pub description: Option<String>,
}

impl IrServer {
    /// Label shown next to the URL: the description, or `Server`.
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or("Server")
    }
}

/// A named security scheme from `components.securitySchemes`.
#[derive(Debug, Clone, Serialize)]
pub struct IrSecurityScheme {
    pub name: String,
    pub scheme_type: String,
    pub scheme: Option<String>,
    pub description: Option<String>,
    pub bearer_format: Option<String>,
    /// `in` of an apiKey scheme.
    pub location: Option<String>,
    /// Header/query/cookie name of an apiKey scheme.
    pub parameter_name: Option<String>,
}

/// A top-level tag declaration.
#[derive(Debug, Clone, Serialize)]
pub struct IrTag {
    pub name: String,
    pub description: Option<String>,
}

/// Operations sharing a display group (first tag, or the default group).
#[derive(Debug, Clone, Serialize)]
pub struct IrGroup {
    pub name: String,
    pub operations: Vec<usize>, // indices into IrSpec.operations
}
