use oamd_core::ir::{IrSecurityScheme, IrSpec};

use super::operation::push_operation;

/// Emit the flattened markdown summary: title, description, version,
/// servers, authentication, then every documented operation under its
/// group heading.
pub fn emit_summary(ir: &IrSpec) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", ir.info.title));
    if let Some(ref description) = ir.info.description {
        out.push_str(&format!("{}\n\n", description));
    }
    out.push_str(&format!("Version: {}\n\n", ir.info.version));

    if !ir.servers.is_empty() {
        out.push_str("## Servers\n\n");
        for server in &ir.servers {
            out.push_str(&format!("- **{}**: {}\n", server.label(), server.url));
        }
        out.push('\n');
    }

    if !ir.security_schemes.is_empty() {
        out.push_str("## Authentication\n\n");
        for scheme in &ir.security_schemes {
            out.push_str(&security_line(scheme));
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("## Endpoints\n\n");
    for group in &ir.groups {
        out.push_str(&format!("### {}\n\n", group.name));
        for op in ir.group_operations(group) {
            push_operation(&mut out, op);
        }
    }

    out
}

/// `- **name**: type (scheme)`
fn security_line(scheme: &IrSecurityScheme) -> String {
    let mut line = format!("- **{}**: {}", scheme.name, scheme.scheme_type);
    if let Some(ref sub) = scheme.scheme {
        line.push_str(&format!(" ({})", sub));
    }
    line
}
