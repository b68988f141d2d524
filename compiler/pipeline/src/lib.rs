#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns schema scripts into `.proto` files.
//!
//! ## Module Organization
//!
//! - `frontends` - Evaluators producing IR bundles from jsonnet, nickel and JSON inputs
//! - `ir_loader` - Bundle decoding with per-source error reporting
//! - `orchestration` - Per-file compilation, bundle compilation and output writing
//! - `protoc` - Downstream `protoc` invocation

use std::process::ExitStatus;

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Semantic invariant violation found while lowering IR.
    #[error(transparent)]
    Analysis(#[from] analysis::AnalysisError),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// I/O error while reading inputs or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Malformed JSON produced by a front-end.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// An IR document does not decode.
    #[error("parsing {input}: {error}")]
    Decode {
        /// Source identifier the document came from
        input: String,
        /// Decoder error
        #[source]
        error: ir::IrError,
    },
    /// An external tool is not installed.
    #[error("`{tool}` not found; is it installed and on PATH?")]
    ToolNotFound {
        /// Tool name
        tool: String,
    },
    /// An external tool exited unsuccessfully.
    #[error("{tool} failed ({status})\n{stderr}")]
    ToolFailed {
        /// Tool name
        tool: String,
        /// Exit status
        status: ExitStatus,
        /// Captured diagnostic output, verbatim
        stderr: String,
    },
    /// An external tool writing straight to the terminal exited unsuccessfully.
    #[error("{tool} exited with {status}")]
    ToolExited {
        /// Tool name
        tool: String,
        /// Exit status
        status: ExitStatus,
    },
    /// A jsonnet script failed to evaluate.
    #[error("jsonnet: {0}")]
    Jsonnet(String),
    /// Failure while compiling one generated file.
    #[error("{file}: {error}")]
    InFile {
        /// Name of the file being generated
        file: String,
        /// Underlying error
        #[source]
        error: Box<PipelineError>,
    },
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

impl From<String> for PipelineError {
    fn from(msg: String) -> Self { PipelineError::Message(msg) }
}

pub mod frontends;
pub mod ir_loader;
pub mod orchestration;
pub mod protoc;

pub use frontends::{Frontend, JsonFrontend, JsonnetFrontend, NickelFrontend};
pub use ir_loader::{decode_bundle, IrBundle, SourcedFile};
pub use orchestration::{
    compile_bundle, compile_file, write_generated, CompileOptions, CompileReport, FileFailure,
    GeneratedFile,
};
pub use protoc::ProtocInvocation;
