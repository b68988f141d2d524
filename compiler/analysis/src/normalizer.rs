//! Option path expansion
//!
//! An option may address a nested sub-field through a dotted `path`. Before merging,
//! the path is folded into the value so every option becomes a bare top-level value.

use std::collections::BTreeMap;

use types::OptionValue;

/// Wrap `value` in one single-key mapping per path segment, innermost last.
///
/// `expand_path("a.b", 1)` yields `{a: {b: 1}}`; an empty path returns `value` as is.
pub fn expand_path(path: &str, value: OptionValue) -> OptionValue {
    if path.is_empty() {
        return value;
    }
    path.rsplit('.').fold(value, |inner, segment| {
        let mut mapping = BTreeMap::new();
        mapping.insert(segment.to_string(), inner);
        OptionValue::Mapping(mapping)
    })
}
