// SPDX-License-Identifier: CC0-1.0

//! Protoweave umbrella crate.
//!
//! Re-exports the workspace crates that make up the compiler core and offers a
//! one-call entry point from IR JSON to proto3 text. The command-line driver lives in
//! `cli/orchestrator`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

pub use {analysis, ast, codegen, ir, pipeline};

use thiserror::Error;

/// Errors from the one-call entry point.
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not a valid IR file.
    #[error(transparent)]
    Ir(#[from] ir::IrError),
    /// Compilation failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
}

/// Compile one IR file document, given as JSON, into `.proto` source text.
pub fn compile_ir_json(json: &str) -> Result<String, Error> {
    let file = ir::FileDef::from_json_str(json)?;
    Ok(pipeline::compile_file(&file)?.contents)
}

/// Miscellaneous metadata about the Protoweave workspace.
pub mod protoweave_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
