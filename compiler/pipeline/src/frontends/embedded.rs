//! Library sources bundled into the binary.
//!
//! Scripts import these by bare name. They are written to a temporary directory that
//! is searched only after every library search path given by the user.

use std::fs;

use tempfile::TempDir;

use crate::Result;

/// Bundled library files, by import path.
pub const LIBRARIES: &[(&str, &str)] =
    &[("protoweave.libsonnet", include_str!("../../lib/protoweave.libsonnet"))];

/// Write every bundled library into a fresh temporary directory.
///
/// The directory lives as long as the returned handle.
pub fn materialize() -> Result<TempDir> {
    let dir = tempfile::Builder::new().prefix("protoweave-lib").tempdir()?;
    for (path, source) in LIBRARIES {
        let target = dir.path().join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, source)?;
    }
    Ok(dir)
}
