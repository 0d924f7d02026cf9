use std::fmt;

use serde::Serialize;

use super::schemas::IrProperty;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Map a path item key (`"get"`, `"post"`, ...) to a method.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    /// Whether operations with this method are documented. Only
    /// GET/POST/PUT/PATCH/DELETE are.
    pub fn is_documented(&self) -> bool {
        matches!(
            self,
            HttpMethod::Get
                | HttpMethod::Post
                | HttpMethod::Put
                | HttpMethod::Patch
                | HttpMethod::Delete
        )
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved API operation.
#[derive(Debug, Clone, Serialize)]
pub struct IrOperation {
    pub method: HttpMethod,
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    /// Absent when empty or identical to the summary.
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Display group: first tag, or the default group.
    pub group: String,
    pub parameters: Vec<IrParameter>,
    pub request_body: Option<IrRequestBody>,
    pub responses: Vec<IrResponse>,
    pub deprecated: bool,
}

impl IrOperation {
    /// `"METHOD /path"`, the key used in endpoint maps.
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// A resolved path/query/header/cookie parameter.
#[derive(Debug, Clone, Serialize)]
pub struct IrParameter {
    pub name: String,
    pub location: IrParameterLocation,
    pub required: bool,
    pub description: Option<String>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IrParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl IrParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrParameterLocation::Path => "path",
            IrParameterLocation::Query => "query",
            IrParameterLocation::Header => "header",
            IrParameterLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for IrParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved request body.
#[derive(Debug, Clone, Serialize)]
pub struct IrRequestBody {
    pub description: Option<String>,
    pub required: bool,
    pub content: Vec<IrMediaType>,
}

/// One entry of a request body's content map.
#[derive(Debug, Clone, Serialize)]
pub struct IrMediaType {
    pub content_type: String,
    /// Object properties of the media schema; empty when it has none.
    pub properties: Vec<IrProperty>,
    /// Pretty-printed example, when the media type carries one.
    pub example: Option<String>,
}

/// A response status code and its description.
#[derive(Debug, Clone, Serialize)]
pub struct IrResponse {
    pub status: String,
    pub description: Option<String>,
}
