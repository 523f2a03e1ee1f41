//! Artifact emitter: pure template rendering for the per-type header and
//! source files and for the regenerated aggregate header.
//!
//! Templates are fixed skeletons with substitution slots; the only
//! conditional is the placeholder body rendered when an implementation
//! block is missing. The regenerated aggregate reuses the base block text
//! exactly as captured by the block matcher, so the base class survives the
//! rewrite byte for byte.

use crate::config::Conventions;
use crate::core::{DeclarationParts, ImplementationBlock};

/// Prefix of the comment emitted in place of a missing implementation
/// block. The type name follows, so the gap is attributable at a glance.
pub const MISSING_IMPL_PLACEHOLDER: &str = "// TODO: implementation not found for";

/// Render the isolated header for one derived type.
pub fn render_header(
    type_name: &str,
    parts: &DeclarationParts,
    include_block: &str,
    conventions: &Conventions,
) -> String {
    let mut out = String::new();
    out.push_str(&conventions.header_prologue);
    out.push('\n');
    if !include_block.is_empty() {
        out.push_str(include_block);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&conventions.namespace_open);
    out.push_str("\n\n");
    out.push_str(&format!(
        "class {} : public {} {{\npublic:\n    explicit {}({});\n    {}\n\nprivate:\n    {}\n}};\n",
        type_name,
        conventions.base_class,
        type_name,
        parts.constructor_params,
        parts.public_methods,
        parts.private_fields,
    ));
    out.push('\n');
    out.push_str(&conventions.namespace_close);
    out.push('\n');
    out
}

/// Render the isolated implementation file for one derived type. A missing
/// block becomes a visible placeholder comment, never a silently empty
/// file.
pub fn render_source(
    type_name: &str,
    implementation: &ImplementationBlock,
    conventions: &Conventions,
) -> String {
    let body = match implementation {
        ImplementationBlock::Found(text) => text.as_str(),
        ImplementationBlock::Missing => {
            return render_source_body(
                type_name,
                &format!("{MISSING_IMPL_PLACEHOLDER} {type_name}"),
                conventions,
            )
        }
    };
    render_source_body(type_name, body, conventions)
}

fn render_source_body(type_name: &str, body: &str, conventions: &Conventions) -> String {
    format!(
        "{}\n\n{}\n\n{}\n\n{}\n",
        conventions.include_for(type_name),
        conventions.namespace_open,
        body,
        conventions.namespace_close,
    )
}

/// Render the regenerated aggregate header: prologue, shared include block,
/// one include per derived type in discovery order, and the base block
/// verbatim.
pub fn render_aggregate(
    include_block: &str,
    derived_names: &[String],
    base_block: &str,
    conventions: &Conventions,
) -> String {
    let mut out = String::new();
    out.push_str(&conventions.header_prologue);
    out.push_str("\n\n");
    if !include_block.is_empty() {
        out.push_str(include_block);
        out.push_str("\n\n");
    }
    for name in derived_names {
        out.push_str(&conventions.include_for(name));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&conventions.namespace_open);
    out.push_str("\n\n");
    out.push_str(base_block);
    out.push_str("\n\n");
    out.push_str(&conventions.namespace_close);
    out.push('\n');
    out
}
