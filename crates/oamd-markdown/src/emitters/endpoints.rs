use indexmap::IndexMap;
use oamd_core::ir::IrSpec;

use super::operation::render_operation;

/// Map every documented operation's `"METHOD /path"` key to its markdown
/// fragment, in document order. Fragments carry no group heading and no
/// trailing blank lines.
pub fn endpoint_fragments(ir: &IrSpec) -> IndexMap<String, String> {
    ir.operations
        .iter()
        .map(|op| {
            let fragment = render_operation(op);
            (op.key(), fragment.trim_end().to_string())
        })
        .collect()
}

/// Emit the endpoint map as pretty-printed JSON.
pub fn emit_endpoint_map(ir: &IrSpec) -> Result<String, serde_json::Error> {
    let fragments = endpoint_fragments(ir);
    log::debug!("rendered {} endpoint fragments", fragments.len());
    let mut json = serde_json::to_string_pretty(&fragments)?;
    json.push('\n');
    Ok(json)
}
