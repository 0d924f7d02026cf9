use oamd_core::ir::{IrOperation, IrParameter, IrProperty, IrRequestBody, IrResponse};

/// Render a single operation as a markdown block, starting at its
/// `#### METHOD /path` heading. Shared by the summary and the endpoint map.
pub fn render_operation(op: &IrOperation) -> String {
    let mut out = String::new();
    push_operation(&mut out, op);
    out
}

pub(crate) fn push_operation(out: &mut String, op: &IrOperation) {
    out.push_str(&format!("#### {} {}\n\n", op.method, op.path));

    if let Some(ref summary) = op.summary {
        out.push_str(&format!("{}\n\n", summary));
    }
    // Already absent when equal to the summary
    if let Some(ref description) = op.description {
        out.push_str(&format!("{}\n\n", description));
    }

    if !op.parameters.is_empty() {
        out.push_str("**Parameters:**\n\n");
        for param in &op.parameters {
            out.push_str(&parameter_line(param));
            out.push('\n');
        }
        out.push('\n');
    }

    if let Some(ref body) = op.request_body {
        push_request_body(out, body);
    }

    if !op.responses.is_empty() {
        out.push_str("**Responses:**\n\n");
        for resp in &op.responses {
            out.push_str(&response_line(resp));
            out.push('\n');
        }
        out.push('\n');
    }
}

fn push_request_body(out: &mut String, body: &IrRequestBody) {
    out.push_str("**Request Body:**\n\n");
    for media in &body.content {
        out.push_str(&format!("Content-Type: `{}`\n\n", media.content_type));
        if media.properties.is_empty() {
            continue;
        }
        for prop in &media.properties {
            out.push_str(&property_line(prop));
            out.push('\n');
        }
        out.push('\n');
    }
}

/// `` - `name` (location) (required) - description ``
pub fn parameter_line(param: &IrParameter) -> String {
    let mut line = format!("- `{}` ({})", param.name, param.location);
    if param.required {
        line.push_str(" (required)");
    }
    if let Some(ref description) = param.description {
        line.push_str(&format!(" - {}", description));
    }
    line
}

/// `` - `name` (type) - description ``
pub fn property_line(prop: &IrProperty) -> String {
    let mut line = format!("- `{}` ({})", prop.name, prop.type_name);
    if let Some(ref description) = prop.description {
        line.push_str(&format!(" - {}", description));
    }
    line
}

/// `` - `code`: description ``
pub fn response_line(resp: &IrResponse) -> String {
    format!(
        "- `{}`: {}",
        resp.status,
        resp.description.as_deref().unwrap_or("")
    )
}
