//! Nickel front-end.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tracing::debug;

use crate::frontends::{has_extension, locate, source_id, stdout_or_failure, Frontend};
use crate::ir_loader::IrBundle;
use crate::{PipelineError, Result};

/// Evaluates `.ncl` scripts with `nickel export`, one process per script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NickelFrontend {
    bin: String,
}

impl Default for NickelFrontend {
    fn default() -> Self { Self::new("nickel") }
}

impl NickelFrontend {
    /// Create a front-end running `bin`.
    pub fn new(bin: impl Into<String>) -> Self { Self { bin: bin.into() } }

    /// Arguments exporting `script` as JSON, importing from the working directory,
    /// the script's directory and its parent.
    pub fn command_args(script: &Path) -> Vec<String> {
        let dir = match script.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        vec![
            "export".to_string(),
            "--import-path".to_string(),
            ".".to_string(),
            "--import-path".to_string(),
            dir.to_string_lossy().into_owned(),
            "--import-path".to_string(),
            dir.join("..").to_string_lossy().into_owned(),
            "--format".to_string(),
            "json".to_string(),
            script.to_string_lossy().into_owned(),
        ]
    }
}

/// Keep the documents of an export that declare a `name`; the rest are library modules.
pub fn named_documents(source: &str, exported: Value) -> Result<Vec<Value>> {
    let is_named = |doc: &Value| doc.as_object().is_some_and(|obj| obj.contains_key("name"));
    match exported {
        Value::Array(items) => Ok(items.into_iter().filter(is_named).collect()),
        doc @ Value::Object(_) => Ok(if is_named(&doc) { vec![doc] } else { Vec::new() }),
        other => Err(PipelineError::Message(format!(
            "{source}: expected an IR object or array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Frontend for NickelFrontend {
    fn name(&self) -> &'static str { "nickel" }

    fn accepts(&self, path: &Path) -> bool { has_extension(path, "ncl") }

    fn evaluate(&self, scripts: &[PathBuf]) -> Result<IrBundle> {
        let mut bundle = IrBundle::new();
        if scripts.is_empty() {
            return Ok(bundle);
        }
        let bin = locate(&self.bin)?;
        for script in scripts {
            let source = source_id(script);
            debug!(script = %source, "exporting nickel");
            let output = Command::new(&bin).args(Self::command_args(script)).output()?;
            let stdout = stdout_or_failure(&self.bin, output).map_err(|error| {
                PipelineError::InFile { file: source.clone(), error: Box::new(error) }
            })?;
            let documents = named_documents(&source, serde_json::from_slice(&stdout)?)?;
            if !documents.is_empty() {
                bundle.insert(source, documents);
            }
        }
        Ok(bundle)
    }
}
