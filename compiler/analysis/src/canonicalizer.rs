//! Option Canonicalization
//!
//! Folds a declaration's option list into one value per option name. Later options
//! override earlier ones, mapping values deep-merge, and a top-level sequence is
//! expanded back into one option per element (a repeated option).

use std::collections::BTreeMap;

use ast::ProtoOption;
use ir::OptionDef;
use types::OptionValue;

use crate::normalizer::expand_path;

/// Merges option lists into their canonical, name-sorted form.
#[derive(Default, Debug, Clone)]
pub struct OptionCanonicalizer;

impl OptionCanonicalizer {
    /// Create a new canonicalizer
    pub fn new() -> Self { Self }

    /// Merge `options` into sorted AST options.
    pub fn merge(&self, options: &[OptionDef]) -> Vec<ProtoOption> {
        let mut merged: BTreeMap<String, OptionValue> = BTreeMap::new();

        for option in options {
            let value = expand_path(&option.path, option.value.clone());
            let name = option.extension.full_name();
            let value = match (merged.remove(&name), value) {
                (Some(OptionValue::Mapping(left)), OptionValue::Mapping(right)) =>
                    OptionValue::Mapping(merge_mappings(left, right)),
                (_, value) => value,
            };
            merged.insert(name, value);
        }

        let mut result = Vec::with_capacity(merged.len());
        for (name, value) in merged {
            match value {
                // A top-level sequence means the option itself is repeated.
                OptionValue::Sequence(items) => result.extend(
                    items.into_iter().map(|item| ProtoOption::new(name.clone(), item)),
                ),
                value => result.push(ProtoOption::new(name, value)),
            }
        }
        result
    }
}

/// Merge `options` into sorted AST options using the default canonicalizer.
pub fn merge_options(options: &[OptionDef]) -> Vec<ProtoOption> {
    OptionCanonicalizer::new().merge(options)
}

/// Deep-merge two message literals. Keys defined by `right` win unless both sides hold
/// mappings, in which case those are merged recursively.
fn merge_mappings(
    mut left: BTreeMap<String, OptionValue>,
    right: BTreeMap<String, OptionValue>,
) -> BTreeMap<String, OptionValue> {
    for (key, right_value) in right {
        let value = match (left.remove(&key), right_value) {
            (Some(OptionValue::Mapping(l)), OptionValue::Mapping(r)) =>
                OptionValue::Mapping(merge_mappings(l, r)),
            (_, value) => value,
        };
        left.insert(key, value);
    }
    left
}
