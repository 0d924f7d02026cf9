use oamd_core::ir::{HttpMethod, IrParameterLocation};
use oamd_core::parse;
use oamd_core::transform::{self, TransformOptions};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const BILLING: &str = include_str!("fixtures/billing.json");

#[test]
fn transform_petstore() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    assert_eq!(ir.info.title, "Petstore");
    assert_eq!(
        ir.info.description.as_deref(),
        Some("A sample API for managing pets.")
    );
    assert_eq!(ir.info.license.as_ref().map(|l| l.name.as_str()), Some("MIT"));

    // options and head are not documented
    let keys: Vec<String> = ir.operations.iter().map(|op| op.key()).collect();
    assert_eq!(
        keys,
        vec![
            "GET /pets",
            "POST /pets",
            "GET /pets/{petId}",
            "DELETE /pets/{petId}",
            "GET /store/inventory",
            "GET /health",
        ]
    );
}

#[test]
fn transform_groups_by_first_tag() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let names: Vec<&str> = ir.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["pets", "store", "Other"]);
    assert_eq!(ir.groups[0].operations, vec![0, 1, 2, 3]);

    let other: Vec<&str> = ir
        .group_operations(&ir.groups[2])
        .map(|op| op.path.as_str())
        .collect();
    assert_eq!(other, vec!["/health"]);
    assert_eq!(ir.tag_description("pets"), Some("Everything about your pets"));
    assert_eq!(ir.tag_description("store"), None);
}

#[test]
fn transform_billing_group_order() {
    let spec = parse::from_json(BILLING).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let names: Vec<&str> = ir.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Billing", "Users", "Other"]);

    let billing: Vec<&str> = ir
        .group_operations(&ir.groups[0])
        .map(|op| op.path.as_str())
        .collect();
    assert_eq!(billing, vec!["/invoices", "/charges"]);

    // every operation lands in exactly one group
    let grouped: usize = ir.groups.iter().map(|g| g.operations.len()).sum();
    assert_eq!(grouped, ir.operations.len());
}

#[test]
fn transform_resolves_parameters_and_responses() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let list = &ir.operations[0];
    assert_eq!(list.method, HttpMethod::Get);
    assert_eq!(list.parameters.len(), 2);
    assert_eq!(list.parameters[0].name, "limit");
    assert_eq!(list.parameters[0].location, IrParameterLocation::Query);
    assert!(!list.parameters[0].required);
    assert_eq!(list.parameters[1].name, "X-Request-Id");
    assert_eq!(list.parameters[1].location, IrParameterLocation::Header);
    assert!(list.parameters[1].required);

    let statuses: Vec<(&str, Option<&str>)> = list
        .responses
        .iter()
        .map(|r| (r.status.as_str(), r.description.as_deref()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("200", Some("A paged array of pets")),
            ("default", Some("Unexpected error")),
        ]
    );

    let show = &ir.operations[2];
    assert_eq!(show.parameters[0].name, "petId");
    assert_eq!(show.description, None, "description equal to summary is dropped");

    let delete = &ir.operations[3];
    assert!(delete.deprecated);
    assert_eq!(delete.responses[0].description, None);
}

#[test]
fn transform_request_body_properties() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let create = &ir.operations[1];
    let body = create.request_body.as_ref().expect("should have a body");
    assert!(body.required);
    assert_eq!(body.content.len(), 1);

    let media = &body.content[0];
    assert_eq!(media.content_type, "application/json");
    let props: Vec<(&str, &str, bool)> = media
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.type_name.as_str(), p.required))
        .collect();
    // the empty-named property is skipped
    assert_eq!(
        props,
        vec![("name", "string", true), ("tag", "string | null", false)]
    );
    // example keys keep document order
    let example = media.example.as_deref().unwrap();
    assert_eq!(example, "{\n  \"tag\": \"dog\",\n  \"name\": \"Rex\"\n}");
}

#[test]
fn transform_components() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let ir = transform::transform(&spec).unwrap();

    let names: Vec<&str> = ir.schemas.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Pet", "NewPet", "PetStatus"]);

    let pet = &ir.schemas[0];
    assert_eq!(pet.type_name, "object");
    assert_eq!(pet.properties[2].type_name, "PetStatus");

    let status = &ir.schemas[2];
    assert_eq!(status.enum_values, vec!["available", "pending", "sold"]);

    let schemes: Vec<(&str, &str, Option<&str>)> = ir
        .security_schemes
        .iter()
        .map(|s| (s.name.as_str(), s.scheme_type.as_str(), s.scheme.as_deref()))
        .collect();
    assert_eq!(
        schemes,
        vec![("bearerAuth", "http", Some("bearer")), ("apiKey", "apiKey", None)]
    );
    assert_eq!(ir.security_schemes[1].parameter_name.as_deref(), Some("X-API-Key"));
}

#[test]
fn transform_strict_refs() {
    let spec = parse::from_json(
        r##"{"info":{"title":"T","version":"1"},"paths":{"/a":{"get":{
            "parameters":[{"$ref":"#/components/parameters/Nope"}]
        }}}}"##,
    )
    .unwrap();

    let lenient = transform::transform(&spec).unwrap();
    assert!(lenient.operations[0].parameters.is_empty());

    let options = TransformOptions {
        strict_refs: true,
        ..TransformOptions::default()
    };
    assert!(transform::transform_with_options(&spec, &options).is_err());
}

#[test]
fn transform_empty_document() {
    let spec = parse::from_json(r#"{"info":{"title":"T","version":"1"}}"#).unwrap();
    let ir = transform::transform(&spec).unwrap();
    assert!(ir.operations.is_empty());
    assert!(ir.groups.is_empty());
    assert!(ir.servers.is_empty());
    assert!(ir.security_schemes.is_empty());
}

#[test]
fn transform_boolean_property_schema() {
    let spec = parse::from_json(
        r#"{"openapi":"3.1.0","info":{"title":"T","version":"1"},"paths":{"/a":{"post":{
            "requestBody":{"content":{"application/json":{"schema":{
                "type":"object",
                "properties":{"meta":true,"name":{"type":"string"}}
            }}}}
        }}},"components":{"schemas":{"Anything":true}}}"#,
    )
    .unwrap();
    let ir = transform::transform(&spec).unwrap();

    let body = ir.operations[0].request_body.as_ref().unwrap();
    let props: Vec<(&str, &str)> = body.content[0]
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.type_name.as_str()))
        .collect();
    assert_eq!(props, vec![("meta", "any"), ("name", "string")]);

    assert_eq!(ir.schemas[0].name, "Anything");
    assert_eq!(ir.schemas[0].type_name, "any");
}

#[test]
fn transform_ignores_malformed_required() {
    let spec = parse::from_json(
        r#"{"info":{"title":"T","version":"1"},"paths":{"/a":{"post":{
            "requestBody":{"content":{"application/json":{"schema":{
                "required":["id"],
                "properties":{
                    "id":{"type":"integer"},
                    "name":{"type":"string","required":true}
                }
            }}}}
        }}}}"#,
    )
    .unwrap();
    let ir = transform::transform(&spec).unwrap();

    let body = ir.operations[0].request_body.as_ref().unwrap();
    let props: Vec<(&str, &str, bool)> = body.content[0]
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.type_name.as_str(), p.required))
        .collect();
    assert_eq!(
        props,
        vec![("id", "integer", true), ("name", "string", false)]
    );
}
