use ast::File;

use crate::generators::declaration::add_declaration;
use crate::generators::options::add_long_options;
use crate::layout::Body;
use crate::utils::quote_str;
use crate::Result;

/// First line of every generated file.
pub const BANNER: &str = "// Generated by protoweavec. DO NOT EDIT!";

/// Lay out a whole file: banner, syntax, package, options, imports and declarations.
pub fn file_body(file: &File) -> Result<Body> {
    let mut body = Body::new();
    body.add_line(BANNER);
    body.add_line("");
    // The embedded newlines leave one blank line after each header statement.
    body.add_line(format!("syntax = {};\n", quote_str(&file.syntax)));
    if !file.package.is_empty() {
        body.add_line(format!("package {};\n", file.package));
    }
    if !file.options.is_empty() {
        add_long_options(&mut body, &file.options)?;
        body.add_line("");
    }
    if !file.imports.is_empty() {
        for import in &file.imports {
            body.add_line(format!("import {};", quote_str(import)));
        }
        body.add_line("");
    }
    for (i, decl) in file.declarations.iter().enumerate() {
        if i > 0 {
            body.add_line("");
        }
        add_declaration(&mut body, decl, false)?;
    }
    body.add_line("");
    Ok(body)
}
