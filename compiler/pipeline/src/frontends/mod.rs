//! Front-end evaluators.
//!
//! A front-end turns schema scripts into an [`IrBundle`]. Jsonnet is evaluated
//! in-process, nickel by shelling out to its interpreter, and the JSON front-end reads
//! IR that was produced elsewhere.

use std::path::{Path, PathBuf};
use std::process::Output;

use tracing::debug;

use crate::ir_loader::IrBundle;
use crate::{PipelineError, Result};

pub mod embedded;
pub mod json;
pub mod jsonnet;
pub mod nickel;

pub use json::JsonFrontend;
pub use jsonnet::JsonnetFrontend;
pub use nickel::NickelFrontend;

/// An evaluator for one input language.
pub trait Frontend {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Whether `path` is an input for this front-end.
    fn accepts(&self, path: &Path) -> bool;

    /// Evaluate `scripts` into IR documents keyed by script path.
    fn evaluate(&self, scripts: &[PathBuf]) -> Result<IrBundle>;
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Resolve `bin` on PATH, distinguishing a missing tool from a failing one.
pub(crate) fn locate(bin: &str) -> Result<PathBuf> {
    which::which(bin).map_err(|_| PipelineError::ToolNotFound { tool: bin.to_string() })
}

/// Turn a finished process into its stdout, or a failure carrying stderr verbatim.
pub(crate) fn stdout_or_failure(tool: &str, output: Output) -> Result<Vec<u8>> {
    debug!(tool, status = %output.status, stdout = output.stdout.len(), "tool finished");
    if !output.status.success() {
        return Err(PipelineError::ToolFailed {
            tool: tool.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output.stdout)
}

/// Display form of a script path, used as its bundle key.
pub(crate) fn source_id(path: &Path) -> String { path.to_string_lossy().into_owned() }
