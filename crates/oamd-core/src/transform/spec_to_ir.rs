use crate::config::DEFAULT_GROUP;
use crate::error::TransformError;
use crate::ir::grouping::{group_key, group_operations};
use crate::ir::*;
use crate::parse::media_type::MediaType;
use crate::parse::operation::Operation;
use crate::parse::parameter::{ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::OpenApiSpec;

/// Options controlling the transform phase.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Group for operations without a tag.
    pub default_group: String,
    /// Fail on dangling or circular `$ref`s instead of logging them.
    pub strict_refs: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            default_group: DEFAULT_GROUP.to_string(),
            strict_refs: false,
        }
    }
}

/// Transform a parsed OpenAPI spec into the resolved IR.
pub fn transform(spec: &OpenApiSpec) -> Result<IrSpec, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit options.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<IrSpec, TransformError> {
    // Phase 1: Resolve $ref pointers that end up in the output
    let resolver = RefResolver::new(spec).strict(options.strict_refs);
    let resolved = resolver.resolve_spec(spec)?;

    // Phase 2: Convert documented operations, in document order
    let operations = resolve_operations(&resolved, options);

    // Phase 3: Group by first tag
    let groups = group_operations(&operations);

    // Phase 4: Component schemas
    let schemas = resolve_schemas(&resolved, &resolver)?;

    // Phase 5: Info, servers, security, tags
    let info = IrInfo {
        title: resolved.info.title.clone(),
        description: non_empty(resolved.info.description.as_deref()),
        version: resolved.info.version.clone(),
        license: resolved.info.license.as_ref().map(|l| IrLicense {
            name: l.name.clone(),
            url: l.url.clone(),
        }),
    };

    let servers = resolved
        .servers
        .iter()
        .map(|s| IrServer {
            url: s.url.clone(),
            description: non_empty(s.description.as_deref()),
        })
        .collect();

    let security_schemes = resolved
        .components
        .iter()
        .flat_map(|c| &c.security_schemes)
        .map(|(name, scheme)| IrSecurityScheme {
            name: name.clone(),
            scheme_type: scheme.scheme_type.clone(),
            scheme: non_empty(scheme.scheme.as_deref()),
            description: non_empty(scheme.description.as_deref()),
            bearer_format: non_empty(scheme.bearer_format.as_deref()),
            location: non_empty(scheme.location.as_deref()),
            parameter_name: non_empty(scheme.name.as_deref()),
        })
        .collect();

    let tags = resolved
        .tags
        .iter()
        .map(|t| IrTag {
            name: t.name.clone(),
            description: non_empty(t.description.as_deref()),
        })
        .collect();

    log::debug!(
        "transformed {} operations into {} groups",
        operations.len(),
        groups.len()
    );

    Ok(IrSpec {
        info,
        servers,
        security_schemes,
        tags,
        schemas,
        operations,
        groups,
    })
}

fn resolve_operations(spec: &OpenApiSpec, options: &TransformOptions) -> Vec<IrOperation> {
    let mut operations = Vec::new();

    for (path, item) in &spec.paths {
        let path_params = resolve_parameters(&item.parameters);
        for (key, op) in &item.operations {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            if !method.is_documented() {
                log::debug!("skipping {} {}", method, path);
                continue;
            }
            operations.push(build_operation(method, path, op, &path_params, options));
        }
    }

    operations
}

fn build_operation(
    method: HttpMethod,
    path: &str,
    op: &Operation,
    path_params: &[IrParameter],
    options: &TransformOptions,
) -> IrOperation {
    let summary = non_empty(op.summary.as_deref());
    let description =
        non_empty(op.description.as_deref()).filter(|d| summary.as_deref() != Some(d.as_str()));

    // Operation-level parameters override path-level ones with the same name and location
    let mut parameters = path_params.to_vec();
    for param in resolve_parameters(&op.parameters) {
        match parameters
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => parameters.push(param),
        }
    }

    let request_body = op.request_body.as_ref().map(resolve_request_body);

    let responses = op
        .responses
        .iter()
        .map(|(status, resp)| IrResponse {
            status: status.clone(),
            description: match resp {
                ResponseOrRef::Response(r) => non_empty(r.description.as_deref()),
                ResponseOrRef::Ref { .. } => None,
            },
        })
        .collect();

    IrOperation {
        method,
        path: path.to_string(),
        operation_id: non_empty(op.operation_id.as_deref()),
        summary,
        description,
        tags: op.tags.clone(),
        group: group_key(&op.tags, &options.default_group).to_string(),
        parameters,
        request_body,
        responses,
        deprecated: op.deprecated.unwrap_or(false),
    }
}

fn resolve_parameters(params: &[ParameterOrRef]) -> Vec<IrParameter> {
    params
        .iter()
        .filter_map(|p| match p {
            ParameterOrRef::Parameter(param) => {
                let location = match param.location {
                    ParameterLocation::Path => IrParameterLocation::Path,
                    ParameterLocation::Query => IrParameterLocation::Query,
                    ParameterLocation::Header => IrParameterLocation::Header,
                    ParameterLocation::Cookie => IrParameterLocation::Cookie,
                };
                Some(IrParameter {
                    name: param.name.clone(),
                    location,
                    required: param.required,
                    description: non_empty(param.description.as_deref()),
                })
            }
            ParameterOrRef::Ref { ref_path } => {
                log::debug!("dropping unresolved parameter {}", ref_path);
                None
            }
        })
        .collect()
}

fn resolve_request_body(body: &RequestBodyOrRef) -> IrRequestBody {
    match body {
        RequestBodyOrRef::RequestBody(rb) => IrRequestBody {
            description: non_empty(rb.description.as_deref()),
            required: rb.required,
            content: rb
                .content
                .iter()
                .map(|(content_type, mt)| IrMediaType {
                    content_type: content_type.clone(),
                    properties: media_properties(mt),
                    example: mt
                        .example
                        .as_ref()
                        .and_then(|v| serde_json::to_string_pretty(v).ok()),
                })
                .collect(),
        },
        RequestBodyOrRef::Ref { .. } => IrRequestBody {
            description: None,
            required: false,
            content: Vec::new(),
        },
    }
}

fn media_properties(mt: &MediaType) -> Vec<IrProperty> {
    match mt.schema {
        Some(ref schema) => schema_properties(schema),
        None => Vec::new(),
    }
}

/// Object properties of a schema. Properties with an empty name are skipped.
fn schema_properties(schema: &SchemaOrRef) -> Vec<IrProperty> {
    let SchemaOrRef::Schema(schema) = schema else {
        return Vec::new();
    };
    schema
        .properties
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, prop)| IrProperty {
            name: name.clone(),
            type_name: prop.type_label(),
            required: schema.required.contains(name),
            description: non_empty(prop.description()),
        })
        .collect()
}

fn resolve_schemas(
    spec: &OpenApiSpec,
    resolver: &RefResolver<'_>,
) -> Result<Vec<IrSchema>, TransformError> {
    let mut schemas = Vec::new();
    let Some(ref components) = spec.components else {
        return Ok(schemas);
    };

    for (name, schema_or_ref) in &components.schemas {
        let resolved = resolver.resolve_schema(schema_or_ref)?;
        let ir_schema = match &resolved {
            SchemaOrRef::Schema(schema) => IrSchema {
                name: name.clone(),
                description: non_empty(schema.description.as_deref()),
                type_name: resolved.type_label(),
                properties: schema_properties(&resolved),
                enum_values: schema
                    .enum_values
                    .iter()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            },
            SchemaOrRef::Ref { .. } | SchemaOrRef::Bool(_) => IrSchema {
                name: name.clone(),
                description: None,
                type_name: resolved.type_label(),
                properties: Vec::new(),
                enum_values: Vec::new(),
            },
        };
        schemas.push(ir_schema);
    }
    Ok(schemas)
}

/// Treat empty strings as absent.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x")), Some("x".to_string()));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_description_equal_to_summary_is_dropped() {
        let spec = parse::from_json(
            r#"{"info":{"title":"T","version":"1"},"paths":{
                "/a":{"get":{"summary":"Same","description":"Same"}},
                "/b":{"get":{"summary":"Short","description":"Longer"}}
            }}"#,
        )
        .unwrap();
        let ir = transform(&spec).unwrap();
        assert_eq!(ir.operations[0].summary.as_deref(), Some("Same"));
        assert_eq!(ir.operations[0].description, None);
        assert_eq!(ir.operations[1].description.as_deref(), Some("Longer"));
    }

    #[test]
    fn test_path_parameters_merge() {
        let spec = parse::from_yaml(
            r#"
info: {title: T, version: "1"}
paths:
  /pets/{id}:
    parameters:
      - {name: id, in: path, required: true}
      - {name: verbose, in: query}
    get:
      parameters:
        - {name: verbose, in: query, description: Extra output}
        - {name: fields, in: query}
"#,
        )
        .unwrap();
        let ir = transform(&spec).unwrap();
        let params = &ir.operations[0].parameters;
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "verbose", "fields"]);
        assert_eq!(params[1].description.as_deref(), Some("Extra output"));
        assert!(params[0].required);
    }

    #[test]
    fn test_custom_default_group() {
        let spec = parse::from_json(
            r#"{"info":{"title":"T","version":"1"},"paths":{"/a":{"get":{"tags":[""]}}}}"#,
        )
        .unwrap();
        let options = TransformOptions {
            default_group: "Misc".to_string(),
            ..TransformOptions::default()
        };
        let ir = transform_with_options(&spec, &options).unwrap();
        assert_eq!(ir.groups[0].name, "Misc");
    }
}
