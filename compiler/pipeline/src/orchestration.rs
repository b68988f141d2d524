//! Pipeline orchestration.
//!
//! Each IR file is lowered and rendered on its own; nothing is shared between files.
//! The caller chooses whether one failing file aborts the run or is reported and
//! skipped.

use std::fs;
use std::path::{Path, PathBuf};

use ir::FileDef;
use tracing::{debug, info, warn};

use crate::ir_loader::{decode_document, IrBundle};
use crate::{PipelineError, Result};

/// A rendered `.proto` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path relative to the output directory
    pub name: String,
    /// Proto source text
    pub contents: String,
}

/// Options controlling bundle compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Keep compiling the remaining files after a failure
    pub keep_going: bool,
}

/// A file that failed to compile.
#[derive(Debug)]
pub struct FileFailure {
    /// Source the failing document came from
    pub source: String,
    /// Declared file name, when the document decoded far enough to have one
    pub file: Option<String>,
    /// What went wrong
    pub error: PipelineError,
}

/// Outcome of compiling a whole bundle.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Successfully rendered files, in bundle order
    pub generated: Vec<GeneratedFile>,
    /// Failures collected in keep-going mode
    pub failures: Vec<FileFailure>,
}

impl CompileReport {
    /// Whether every file compiled.
    pub fn is_success(&self) -> bool { self.failures.is_empty() }
}

/// Lower and render one IR file.
pub fn compile_file(file: &FileDef) -> Result<GeneratedFile> {
    let ast = analysis::lower_file(file)?;
    let contents = codegen::render_file(&ast)?;
    Ok(GeneratedFile { name: file.name.clone(), contents })
}

/// Compile every document of `bundle`.
///
/// Without `keep_going` the first failure is returned as an error naming its file.
pub fn compile_bundle(bundle: &IrBundle, options: CompileOptions) -> Result<CompileReport> {
    let mut report = CompileReport::default();
    for (source, documents) in bundle {
        for document in documents {
            let outcome = decode_document(source, document).and_then(|file| {
                compile_file(&file).map_err(|error| PipelineError::InFile {
                    file: file.name.clone(),
                    error: Box::new(error),
                })
            });
            match outcome {
                Ok(generated) => {
                    debug!(source = %source, file = %generated.name, "compiled");
                    report.generated.push(generated);
                }
                Err(error) if options.keep_going => {
                    warn!(source = %source, %error, "skipping file");
                    let file = match &error {
                        PipelineError::InFile { file, .. } => Some(file.clone()),
                        _ => None,
                    };
                    report.failures.push(FileFailure { source: source.clone(), file, error });
                }
                Err(error) => return Err(error),
            }
        }
    }
    Ok(report)
}

/// Write `files` under `out_dir`, creating intermediate directories.
///
/// Returns the written paths in input order.
pub fn write_generated(out_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.contents)?;
        info!(path = %path.display(), "wrote proto file");
        written.push(path);
    }
    Ok(written)
}
