pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod server;
pub mod spec;

use crate::error::ParseError;
use spec::OpenApiSpec;

/// Parse an OpenAPI spec from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI spec from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI spec, picking JSON when the document starts with `{`
/// and YAML otherwise.
pub fn from_str(input: &str) -> Result<OpenApiSpec, ParseError> {
    if input.trim_start().starts_with('{') {
        from_json(input)
    } else {
        from_yaml(input)
    }
}

fn validate_version(spec: &OpenApiSpec) -> Result<(), ParseError> {
    match spec.openapi.as_deref() {
        Some(version) if !version.starts_with("3.") => {
            Err(ParseError::UnsupportedVersion(version.to_string()))
        }
        Some(_) => Ok(()),
        None => {
            log::warn!("document has no `openapi` version field, assuming 3.x");
            Ok(())
        }
    }
}
