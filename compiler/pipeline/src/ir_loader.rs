//! IR bundle decoding.
//!
//! Front-ends produce a bundle mapping each source identifier (usually a script path)
//! to the IR documents it evaluated to. Every document is decoded on its own so an
//! error names the source that produced it.

use std::collections::BTreeMap;

use ir::FileDef;
use serde_json::Value;

use crate::{PipelineError, Result};

/// Source identifier mapped to the IR documents it produced.
pub type IrBundle = BTreeMap<String, Vec<Value>>;

/// A decoded IR file and the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedFile {
    /// Source identifier
    pub source: String,
    /// Decoded IR file
    pub file: FileDef,
}

/// Decode one document produced by `source`.
pub fn decode_document(source: &str, document: &Value) -> Result<FileDef> {
    FileDef::from_value(document.clone())
        .map_err(|error| PipelineError::Decode { input: source.to_string(), error })
}

/// Decode every document of `bundle`, in source order.
pub fn decode_bundle(bundle: &IrBundle) -> Result<Vec<SourcedFile>> {
    let mut files = Vec::new();
    for (source, documents) in bundle {
        for document in documents {
            files.push(SourcedFile { source: source.clone(), file: decode_document(source, document)? });
        }
    }
    Ok(files)
}

/// Merge `other` into `bundle`; a source present in both keeps the documents of `other`.
pub fn merge_bundles(bundle: &mut IrBundle, other: IrBundle) { bundle.extend(other); }
