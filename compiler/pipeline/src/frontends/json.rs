//! Pre-evaluated JSON IR input.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::frontends::{has_extension, source_id, Frontend};
use crate::ir_loader::{merge_bundles, IrBundle};
use crate::{PipelineError, Result};

/// Reads `.json` files holding IR that some other tool already produced.
///
/// A file may hold a single IR file document, an array of documents, or a bundle
/// object mapping source ids to arrays of documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFrontend;

impl JsonFrontend {
    /// Create the front-end.
    pub fn new() -> Self { Self }

    /// Interpret the parsed content of `source`.
    pub fn bundle_from_value(source: &str, value: Value) -> Result<IrBundle> {
        let mut bundle = IrBundle::new();
        if value.get("name").is_some() {
            bundle.insert(source.to_string(), vec![value]);
            return Ok(bundle);
        }
        match value {
            Value::Array(documents) => {
                bundle.insert(source.to_string(), documents);
            }
            Value::Object(map) =>
                for (key, documents) in map {
                    match documents {
                        Value::Array(documents) => {
                            bundle.insert(key, documents);
                        }
                        _ =>
                            return Err(PipelineError::Message(format!(
                                "{source}: bundle entry `{key}` must be an array of IR documents"
                            ))),
                    }
                },
            _ =>
                return Err(PipelineError::Message(format!(
                    "{source}: expected an IR document, an array or a bundle object"
                ))),
        }
        Ok(bundle)
    }
}

impl Frontend for JsonFrontend {
    fn name(&self) -> &'static str { "json" }

    fn accepts(&self, path: &Path) -> bool { has_extension(path, "json") }

    fn evaluate(&self, scripts: &[PathBuf]) -> Result<IrBundle> {
        let mut bundle = IrBundle::new();
        for script in scripts {
            let source = source_id(script);
            debug!(input = %source, "reading json ir");
            let content = fs::read_to_string(script)?;
            let value: Value = serde_json::from_str(&content).map_err(|error| {
                PipelineError::InFile { file: source.clone(), error: Box::new(error.into()) }
            })?;
            merge_bundles(&mut bundle, Self::bundle_from_value(&source, value)?);
        }
        Ok(bundle)
    }
}
