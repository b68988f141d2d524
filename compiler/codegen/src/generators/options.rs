//! Option rendering in short (bracketed) and long (statement) form.

use ast::{OptionValue, ProtoOption};

use crate::layout::Body;
use crate::utils::{quote_bytes, quote_str};
use crate::{CodegenError, Result};

/// Append a comma-separated short-form option list, e.g. the inside of `[...]`.
pub fn add_short_options(body: &mut Body, options: &[ProtoOption]) -> Result<()> {
    for (i, option) in options.iter().enumerate() {
        let name = if option.is_extension() || !option.path.is_empty() {
            let mut name = format!("({})", option.name);
            if !option.path.is_empty() {
                name.push('.');
                name.push_str(&option.path);
            }
            name
        } else {
            option.name.clone()
        };
        let suffix = if i + 1 < options.len() { "," } else { "" };
        add_option_value(body, &option.name, &option.value, &format!("{name} = "), suffix)?;
    }
    Ok(())
}

/// Append one `option <name> = <value>;` statement per option.
pub fn add_long_options(body: &mut Body, options: &[ProtoOption]) -> Result<()> {
    for option in options {
        if !option.path.is_empty() {
            return Err(CodegenError::PathOnLongOption { option: option.name.clone() });
        }
        let prefix = if option.is_extension() {
            format!("option ({}) = ", option.name)
        } else {
            format!("option {} = ", option.name)
        };
        add_option_value(body, &option.name, &option.value, &prefix, ";")?;
    }
    Ok(())
}

/// Append `prefix`, the rendered `value`, then `suffix`.
///
/// Message literals and lists open a nested block that the layout engine may collapse.
pub fn add_option_value(
    body: &mut Body,
    option: &str,
    value: &OptionValue,
    prefix: &str,
    suffix: &str,
) -> Result<()> {
    match value {
        OptionValue::Bool(b) => body.add_line(format!("{prefix}{b}{suffix}")),
        OptionValue::Number(n) => body.add_line(format!("{prefix}{n}{suffix}")),
        OptionValue::EnumLiteral(name) => body.add_line(format!("{prefix}{name}{suffix}")),
        OptionValue::String(s) => body.add_line(format!("{prefix}{}{suffix}", quote_str(s))),
        OptionValue::Bytes(bytes) =>
            body.add_line(format!("{prefix}{}{suffix}", quote_bytes(bytes))),
        OptionValue::Mapping(entries) => {
            body.add_block(format!("{prefix}{{"), format!("}}{suffix}"), |inner| {
                for (i, (key, entry)) in entries.iter().enumerate() {
                    let separator = if i + 1 < entries.len() { "," } else { "" };
                    add_option_value(inner, option, entry, &format!("{key}: "), separator)?;
                }
                Ok(())
            })?;
        }
        OptionValue::Sequence(items) => {
            body.add_block(format!("{prefix}["), format!("]{suffix}"), |inner| {
                for (i, item) in items.iter().enumerate() {
                    let separator = if i + 1 < items.len() { "," } else { "" };
                    add_option_value(inner, option, item, "", separator)?;
                }
                Ok(())
            })?;
        }
        OptionValue::Null =>
            return Err(CodegenError::UnsupportedValue {
                option: option.to_string(),
                kind: value.kind_name(),
            }),
    }
    Ok(())
}
