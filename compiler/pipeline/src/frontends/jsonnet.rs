//! Jsonnet front-end.
//!
//! Scripts are evaluated in-process. One generated entry file imports every script and
//! maps its path to the manifested IR documents, so all scripts share one evaluator and
//! its import cache.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use jrsonnet_evaluator::manifest::JsonFormat;
use jrsonnet_evaluator::trace::PathResolver;
use jrsonnet_evaluator::{FileImportResolver, State};
use tracing::debug;

use crate::frontends::{embedded, has_extension, source_id, Frontend};
use crate::ir_loader::IrBundle;
use crate::{PipelineError, Result};

/// Name of the generated entry file inside the library directory.
const ENTRY_FILE: &str = "protoweave-entry.jsonnet";

const MANIFEST_HELPER: &str = r#"
local manifest(file) =
    if std.isArray(file)
    then [f.manifestProtoIR() for f in file]
    else [file.manifestProtoIR()];"#;

/// Evaluates `.jsonnet` scripts with an embedded jsonnet interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonnetFrontend {
    jpaths: Vec<PathBuf>,
}

impl JsonnetFrontend {
    /// Create a front-end with the library search paths `jpaths`.
    ///
    /// As with `jsonnet -J`, later search paths take precedence over earlier ones.
    pub fn new(jpaths: Vec<PathBuf>) -> Self { Self { jpaths } }

    /// Search paths as passed on the command line.
    pub fn jpaths(&self) -> &[PathBuf] { &self.jpaths }

    /// Directories searched for imports, most preferred first.
    ///
    /// `library_dir` holds the bundled libraries and is searched last. Imports are
    /// first resolved next to the importing file.
    pub fn library_paths(&self, library_dir: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.jpaths.iter().rev().cloned().collect();
        paths.push(library_dir.to_path_buf());
        paths
    }

    fn state(&self, library_dir: &Path) -> State {
        let state = State::default();
        state.set_import_resolver(FileImportResolver::new(self.library_paths(library_dir)));
        state.set_context_initializer(jrsonnet_stdlib::ContextInitializer::new(
            state.clone(),
            PathResolver::new_cwd_fallback(),
        ));
        state
    }
}

/// Build the entry file evaluating `scripts` into an IR bundle.
///
/// Each script is a pair of its bundle key and the path it is imported from.
pub fn snippet(scripts: &[(String, PathBuf)]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    for (i, (_, path)) in scripts.iter().enumerate() {
        let _ = writeln!(out, "local f{i} = import {};", quote(&source_id(path)));
    }
    out.push_str(MANIFEST_HELPER);
    out.push_str("\n\n{\n");
    for (i, (id, _)) in scripts.iter().enumerate() {
        let _ = writeln!(out, "    {}: manifest(f{i}),", quote(id));
    }
    out.push_str("}\n");
    out
}

fn quote(value: &str) -> String {
    // JSON string literals are valid jsonnet string literals.
    serde_json::Value::String(value.to_string()).to_string()
}

impl Frontend for JsonnetFrontend {
    fn name(&self) -> &'static str { "jsonnet" }

    fn accepts(&self, path: &Path) -> bool { has_extension(path, "jsonnet") }

    fn evaluate(&self, scripts: &[PathBuf]) -> Result<IrBundle> {
        if scripts.is_empty() {
            return Ok(IrBundle::new());
        }
        let cwd = std::env::current_dir()?;
        let imports: Vec<(String, PathBuf)> =
            scripts.iter().map(|script| (source_id(script), cwd.join(script))).collect();

        let library_dir = embedded::materialize()?;
        let entry = library_dir.path().join(ENTRY_FILE);
        fs::write(&entry, snippet(&imports))?;
        debug!(scripts = scripts.len(), jpaths = self.jpaths.len(), "evaluating jsonnet");

        let state = self.state(library_dir.path());
        let manifested = state
            .import(&entry)
            .and_then(|value| value.manifest(JsonFormat::default()))
            .map_err(|e| PipelineError::Jsonnet(e.to_string()))?;
        Ok(serde_json::from_str(&manifested)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_imports_every_script() {
        let text = snippet(&[
            ("a.jsonnet".to_string(), PathBuf::from("/work/a.jsonnet")),
            ("dir/b.jsonnet".to_string(), PathBuf::from("/work/dir/b.jsonnet")),
        ]);
        assert!(text.starts_with(
            "local f0 = import \"/work/a.jsonnet\";\nlocal f1 = import \"/work/dir/b.jsonnet\";\n"
        ));
        assert!(text.contains("then [f.manifestProtoIR() for f in file]"));
        assert!(text.ends_with(
            "{\n    \"a.jsonnet\": manifest(f0),\n    \"dir/b.jsonnet\": manifest(f1),\n}\n"
        ));
    }

    #[test]
    fn test_bundled_libraries_have_lowest_priority() {
        let frontend = JsonnetFrontend::new(vec![PathBuf::from("lib"), PathBuf::from("vendor")]);
        assert_eq!(
            frontend.library_paths(Path::new("/tmp/bundled")),
            vec![PathBuf::from("vendor"), PathBuf::from("lib"), PathBuf::from("/tmp/bundled")]
        );
    }

    #[test]
    fn test_evaluation_errors_are_reported() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let script = temp_dir.path().join("broken.jsonnet");
        fs::write(&script, "local pw = import 'missing.libsonnet'; pw").expect("writable");

        let err = JsonnetFrontend::default().evaluate(&[script]).expect_err("import fails");
        assert!(matches!(
            err,
            PipelineError::Jsonnet(ref message) if message.contains("missing.libsonnet")
        ));
    }
}
