#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Proto3 text generation for Protoweave.
//!
//! This crate renders a canonical AST [`ast::File`] into deterministic proto3 source.
//! Rendering happens in two steps: generators translate declarations into a
//! [`layout::Body`] tree, and the layout engine decides which nested blocks fit on
//! their opening line.

pub mod generators;
pub mod layout;
pub mod utils;

use thiserror::Error;
use tracing::debug;

pub use generators::file::BANNER;

/// Error type for code generation operations in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// A statement-level option carries a sub-field path.
    #[error("cannot have path specified for long option `{option}`")]
    PathOnLongOption {
        /// Option name
        option: String,
    },
    /// An option value has a shape that cannot be rendered.
    #[error("option `{option}` has an unsupported {kind} value")]
    UnsupportedValue {
        /// Option name
        option: String,
        /// Shape of the offending value
        kind: &'static str,
    },
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Render `file` as proto3 source text, ending with a newline.
pub fn render_file(file: &ast::File) -> Result<String> {
    let text = generators::file::file_body(file)?.render();
    debug!(file = %file.name, bytes = text.len(), "rendered proto file");
    Ok(text)
}
