use minijinja::{Environment, context};
use oamd_core::ir::IrSpec;

/// Emit the full markdown reference: metadata, servers, authentication
/// details, grouped operations with tag descriptions, and component schemas.
pub fn emit_reference(ir: &IrSpec) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(
        "reference.md.j2",
        include_str!("../../templates/reference.md.j2"),
    )?;
    let tmpl = env.get_template("reference.md.j2")?;

    let groups: Vec<minijinja::Value> = ir
        .groups
        .iter()
        .map(|group| {
            let operations: Vec<_> = ir.group_operations(group).collect();
            context! {
                name => group.name,
                description => ir.tag_description(&group.name),
                operations => operations,
            }
        })
        .collect();

    let mut rendered = tmpl.render(context! {
        info => ir.info,
        servers => ir.servers,
        security_schemes => ir.security_schemes,
        groups => groups,
        schemas => ir.schemas,
        operation_count => ir.operations.len(),
    })?;

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oamd_core::{parse, transform};

    #[test]
    fn test_minimal_reference() {
        let spec = parse::from_json(
            r#"{"info":{"title":"T","version":"1"},"paths":{"/a":{"get":{"summary":"S","tags":["X"]}}}}"#,
        )
        .unwrap();
        let md = emit_reference(&transform::transform(&spec).unwrap()).unwrap();
        insta::assert_snapshot!(md, @r"
        # T

        - Version: 1
        - Endpoints: 1

        ## Endpoints

        ### X

        #### GET /a

        S
        ");
    }

    #[test]
    fn test_reference_without_paths() {
        let spec = parse::from_json(r#"{"info":{"title":"T","version":"1"}}"#).unwrap();
        let md = emit_reference(&transform::transform(&spec).unwrap()).unwrap();
        assert!(md.contains("## Endpoints"));
        assert!(!md.contains("###"));
        assert!(!md.contains("## Schemas"));
    }
}
