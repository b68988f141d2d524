//! Declaration rendering.

use ast::{Declaration, DeclarationKind, FieldDetails, MethodDetails, Reserved, ReservedRange};

use crate::generators::doc_comment::add_help;
use crate::generators::options::{add_long_options, add_short_options};
use crate::layout::Body;
use crate::utils::quote_str;
use crate::Result;

/// Append `decl` with its doc comment. `separate` inserts a blank line before a
/// non-empty doc comment; it is set for every declaration but the first of a block.
pub fn add_declaration(body: &mut Body, decl: &Declaration, separate: bool) -> Result<()> {
    add_help(body, &decl.help, separate);
    match &decl.kind {
        DeclarationKind::Field { number, details } => add_field(body, decl, *number, details),
        DeclarationKind::EnumValue { number } => {
            let signature = format!("{} = {}", decl.name, number);
            add_signature_with_short_options(body, decl, signature)
        }
        DeclarationKind::Method { details } => add_method(body, decl, details),
        kind => {
            let keyword = kind.keyword().unwrap_or_default();
            body.add_block(format!("{keyword} {} {{", decl.name), "}", |inner| {
                add_block_body(inner, decl)
            })
        }
    }
}

fn add_block_body(inner: &mut Body, decl: &Declaration) -> Result<()> {
    if !decl.options.is_empty() {
        add_long_options(inner, &decl.options)?;
        inner.add_line("");
    }
    for (i, child) in decl.kind.declarations().iter().enumerate() {
        add_declaration(inner, child, i > 0)?;
    }
    if let Some(reserved) = decl.kind.reserved().filter(|reserved| !reserved.is_empty()) {
        add_reserved(inner, reserved);
    }
    Ok(())
}

fn add_reserved(inner: &mut Body, reserved: &Reserved) {
    inner.add_line("");
    for range in &reserved.ranges {
        inner.add_line(reserved_range_line(range));
    }
    for name in &reserved.names {
        inner.add_line(format!("reserved {};", quote_str(name)));
    }
}

/// The `reserved` statement for one range.
pub fn reserved_range_line(range: &ReservedRange) -> String {
    match range.end {
        None => format!("reserved {} to max;", range.start),
        Some(end) if end == range.start => format!("reserved {};", range.start),
        Some(end) => format!("reserved {} to {};", range.start, end),
    }
}

fn add_field(body: &mut Body, decl: &Declaration, number: i64, details: &FieldDetails) -> Result<()> {
    let label =
        if details.label.is_empty() { String::new() } else { format!("{} ", details.label) };
    let signature = format!("{label}{} {} = {number}", details.type_name, decl.name);
    add_signature_with_short_options(body, decl, signature)
}

fn add_signature_with_short_options(
    body: &mut Body,
    decl: &Declaration,
    signature: String,
) -> Result<()> {
    if decl.options.is_empty() {
        body.add_line(format!("{signature};"));
        return Ok(());
    }
    body.add_block(format!("{signature} ["), "];", |inner| add_short_options(inner, &decl.options))
}

fn add_method(body: &mut Body, decl: &Declaration, details: &MethodDetails) -> Result<()> {
    let signature = format!(
        "rpc {}({}) returns ({})",
        decl.name,
        streamed(&details.input_type, details.client_streaming),
        streamed(&details.output_type, details.server_streaming),
    );
    if decl.options.is_empty() {
        body.add_line(format!("{signature};"));
        return Ok(());
    }
    body.add_block(format!("{signature} {{"), "};", |inner| add_long_options(inner, &decl.options))
}

fn streamed(type_name: &str, streaming: bool) -> String {
    if streaming {
        format!("stream {type_name}")
    } else {
        type_name.to_string()
    }
}
