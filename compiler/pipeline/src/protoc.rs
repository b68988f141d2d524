//! Downstream `protoc` invocation.

use std::process::Command;

use tracing::info;

use crate::frontends::locate;
use crate::{PipelineError, Result};

/// Arguments for one `protoc` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocInvocation {
    bin: String,
    args: Vec<String>,
}

impl ProtocInvocation {
    /// Create an invocation of `bin` with the caller's pass-through arguments.
    pub fn new(bin: impl Into<String>, args: Vec<String>) -> Self { Self { bin: bin.into(), args } }

    /// Arguments as they will be passed.
    pub fn args(&self) -> &[String] { &self.args }

    /// Whether any argument requests an output (`--<lang>_out=`); otherwise protoc is skipped.
    pub fn requested(&self) -> bool { self.args.iter().any(|arg| arg.contains("_out=")) }

    /// Append generated file names not already present.
    pub fn add_files<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if !self.args.iter().any(|arg| arg == name) {
                self.args.push(name.to_string());
            }
        }
    }

    /// Run protoc with inherited stdout and stderr.
    pub fn run(&self) -> Result<()> {
        let path = locate(&self.bin)?;
        info!(bin = %path.display(), args = ?self.args, "running protoc");
        let status = Command::new(path).args(&self.args).status()?;
        if !status.success() {
            return Err(PipelineError::ToolExited { tool: self.bin.clone(), status });
        }
        Ok(())
    }
}
