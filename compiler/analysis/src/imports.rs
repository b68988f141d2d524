//! Import discovery
//!
//! Walks the whole IR file and collects every file that declares a referenced type.

use std::collections::BTreeSet;

use ir::visit::{walk_file, Visitor};
use ir::{CustomOptionDef, FileDef, TypeRef};
use types::DESCRIPTOR_PROTO;

/// Visitor accumulating the import set of one file.
#[derive(Debug, Clone)]
pub struct ImportCollector {
    current: String,
    imports: BTreeSet<String>,
}

impl ImportCollector {
    /// Create a collector for the file named `current`, whose own name is never imported.
    pub fn new(current: impl Into<String>) -> Self {
        Self { current: current.into(), imports: BTreeSet::new() }
    }

    /// Sorted, deduplicated imports seen so far.
    pub fn into_imports(self) -> Vec<String> { self.imports.into_iter().collect() }
}

impl Visitor for ImportCollector {
    fn visit_custom_option(&mut self, custom: &CustomOptionDef) {
        self.imports.insert(DESCRIPTOR_PROTO.to_string());
        ir::visit::walk_custom_option(self, custom);
    }

    fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        if !type_ref.filename.is_empty() && type_ref.filename != self.current {
            self.imports.insert(type_ref.filename.clone());
        }
    }
}

/// Sorted imports of `file`.
pub fn collect_imports(file: &FileDef) -> Vec<String> {
    let mut collector = ImportCollector::new(file.name.clone());
    walk_file(&mut collector, file);
    collector.into_imports()
}
