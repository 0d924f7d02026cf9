use indexmap::IndexMap;

use super::components::Components;
use super::media_type::MediaType;
use super::operation::{Operation, PathItem};
use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// Resolves `$ref` pointers to `#/components/...` for the parts of a spec
/// that get rendered: parameters, request bodies, responses and the
/// top-level schema of each request body media type (including its `allOf`
/// members).
///
/// Property schemas are left as-is so renderers can show the referenced
/// component name. Dangling references are logged and kept unless the
/// resolver is strict.
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
    strict: bool,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
            strict: false,
        }
    }

    /// Fail on dangling or circular references instead of keeping them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Return a copy of the spec with all rendered references resolved.
    pub fn resolve_spec(&self, spec: &OpenApiSpec) -> Result<OpenApiSpec, ResolveError> {
        let mut resolved = spec.clone();
        for (path, item) in &mut resolved.paths {
            log::debug!("resolving references under {}", path);
            self.resolve_path_item(item)?;
        }
        Ok(resolved)
    }

    fn resolve_path_item(&self, item: &mut PathItem) -> Result<(), ResolveError> {
        item.parameters = self.resolve_parameters(&item.parameters)?;
        for (_method, op) in &mut item.operations {
            self.resolve_operation(op)?;
        }
        Ok(())
    }

    fn resolve_operation(&self, op: &mut Operation) -> Result<(), ResolveError> {
        op.parameters = self.resolve_parameters(&op.parameters)?;

        if let Some(ref body) = op.request_body {
            op.request_body = Some(self.resolve_request_body_or_ref(body)?);
        }

        let mut resolved_responses = IndexMap::new();
        for (status, resp) in &op.responses {
            resolved_responses.insert(status.clone(), self.resolve_response_or_ref(resp)?);
        }
        op.responses = resolved_responses;

        Ok(())
    }

    fn resolve_parameters(
        &self,
        params: &[ParameterOrRef],
    ) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params
            .iter()
            .map(|p| self.resolve_parameter_or_ref(p))
            .collect()
    }

    fn resolve_parameter_or_ref(
        &self,
        param: &ParameterOrRef,
    ) -> Result<ParameterOrRef, ResolveError> {
        let ParameterOrRef::Ref { ref_path } = param else {
            return Ok(param.clone());
        };
        let found = follow_chain(
            ref_path,
            "parameters",
            self.components.map(|c| &c.parameters),
            |p| match p {
                ParameterOrRef::Ref { ref_path } => Some(ref_path),
                ParameterOrRef::Parameter(_) => None,
            },
        );
        match found {
            Ok(p) => Ok(p.clone()),
            Err(e) => self.keep_dangling(e, param.clone()),
        }
    }

    fn resolve_request_body_or_ref(
        &self,
        body: &RequestBodyOrRef,
    ) -> Result<RequestBodyOrRef, ResolveError> {
        let found = match body {
            RequestBodyOrRef::RequestBody(_) => Ok(body),
            RequestBodyOrRef::Ref { ref_path } => follow_chain(
                ref_path,
                "requestBodies",
                self.components.map(|c| &c.request_bodies),
                |rb| match rb {
                    RequestBodyOrRef::Ref { ref_path } => Some(ref_path),
                    RequestBodyOrRef::RequestBody(_) => None,
                },
            ),
        };
        match found {
            Ok(RequestBodyOrRef::RequestBody(rb)) => {
                let mut rb = rb.clone();
                self.resolve_media_types(&mut rb.content)?;
                Ok(RequestBodyOrRef::RequestBody(rb))
            }
            Ok(other) => Ok(other.clone()),
            Err(e) => self.keep_dangling(e, body.clone()),
        }
    }

    fn resolve_response_or_ref(&self, resp: &ResponseOrRef) -> Result<ResponseOrRef, ResolveError> {
        let found = match resp {
            ResponseOrRef::Response(_) => Ok(resp),
            ResponseOrRef::Ref { ref_path } => follow_chain(
                ref_path,
                "responses",
                self.components.map(|c| &c.responses),
                |r| match r {
                    ResponseOrRef::Ref { ref_path } => Some(ref_path),
                    ResponseOrRef::Response(_) => None,
                },
            ),
        };
        match found {
            Ok(r) => Ok(r.clone()),
            Err(e) => self.keep_dangling(e, resp.clone()),
        }
    }

    fn resolve_media_types(
        &self,
        content: &mut IndexMap<String, MediaType>,
    ) -> Result<(), ResolveError> {
        for (_content_type, mt) in content.iter_mut() {
            if let Some(ref schema) = mt.schema {
                mt.schema = Some(self.resolve_schema(schema)?);
            }
        }
        Ok(())
    }

    /// Resolve a schema's own `$ref` chain and fold the properties of its
    /// `allOf` members into it, in member order ahead of its own properties.
    pub fn resolve_schema(&self, schema: &SchemaOrRef) -> Result<SchemaOrRef, ResolveError> {
        let mut stack = Vec::new();
        self.resolve_schema_inner(schema, &mut stack)
    }

    fn resolve_schema_inner(
        &self,
        schema: &SchemaOrRef,
        stack: &mut Vec<String>,
    ) -> Result<SchemaOrRef, ResolveError> {
        match schema {
            SchemaOrRef::Ref { ref_path } => {
                if stack.contains(ref_path) {
                    return self
                        .keep_dangling(ResolveError::CircularRef(ref_path.clone()), schema.clone());
                }
                let target = match follow_chain(
                    ref_path,
                    "schemas",
                    self.components.map(|c| &c.schemas),
                    |s| match s {
                        SchemaOrRef::Ref { ref_path } => Some(ref_path),
                        _ => None,
                    },
                ) {
                    Ok(target) => target,
                    Err(e) => return self.keep_dangling(e, schema.clone()),
                };
                stack.push(ref_path.clone());
                let resolved = self.resolve_schema_inner(target, stack);
                stack.pop();
                resolved
            }
            SchemaOrRef::Schema(inner) => {
                if inner.all_of.is_empty() {
                    return Ok(schema.clone());
                }
                let merged = self.merge_all_of(inner, stack)?;
                Ok(SchemaOrRef::Schema(Box::new(merged)))
            }
            SchemaOrRef::Bool(_) => Ok(schema.clone()),
        }
    }

    fn merge_all_of(&self, schema: &Schema, stack: &mut Vec<String>) -> Result<Schema, ResolveError> {
        let mut merged = schema.clone();
        let mut properties = IndexMap::new();
        let mut required = Vec::new();

        for member in &schema.all_of {
            if let SchemaOrRef::Schema(resolved) = self.resolve_schema_inner(member, stack)? {
                if merged.schema_type.is_none() {
                    merged.schema_type = resolved.schema_type.clone();
                }
                for (name, prop) in &resolved.properties {
                    properties.insert(name.clone(), prop.clone());
                }
                required.extend(resolved.required.iter().cloned());
            }
        }
        for (name, prop) in &schema.properties {
            properties.insert(name.clone(), prop.clone());
        }
        required.extend(schema.required.iter().cloned());

        merged.properties = properties;
        merged.required = required;
        merged.all_of = Vec::new();
        Ok(merged)
    }

    fn keep_dangling<T>(&self, err: ResolveError, original: T) -> Result<T, ResolveError> {
        if self.strict {
            return Err(err);
        }
        log::warn!("{}, leaving reference unresolved", err);
        Ok(original)
    }
}

/// Follow a `$ref` through a component table until a non-reference entry
/// is reached.
fn follow_chain<'c, T>(
    ref_path: &str,
    section: &str,
    table: Option<&'c IndexMap<String, T>>,
    next_ref: impl Fn(&'c T) -> Option<&'c String>,
) -> Result<&'c T, ResolveError> {
    let mut seen: Vec<&str> = Vec::new();
    let mut current = ref_path;
    loop {
        if seen.contains(&current) {
            return Err(ResolveError::CircularRef(ref_path.to_string()));
        }
        seen.push(current);
        let name = parse_ref_name(current, section)?;
        let entry = table
            .and_then(|t| t.get(name))
            .ok_or_else(|| ResolveError::RefTargetNotFound(current.to_string()))?;
        match next_ref(entry) {
            Some(next) => current = next.as_str(),
            None => return Ok(entry),
        }
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
fn parse_ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}
