//! Reserved Validation
//!
//! Validates and normalizes the reserved numbers and names of messages and enums.
//! Ranges come out sorted, non-overlapping and maximally coalesced; names come out
//! sorted and unique.

use std::collections::BTreeSet;

use ast::{Reserved, ReservedRange};
use ir::ReservedRangeDef;
use types::{MAX_ENUM_VALUE_NUMBER, MAX_FIELD_NUMBER};

use crate::{AnalysisError, Result};

/// Reserved validator bound to a maximum number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedValidator {
    max: i64,
}

impl ReservedValidator {
    /// Validator for message field numbers
    pub fn for_messages() -> Self { Self { max: MAX_FIELD_NUMBER } }

    /// Validator for enum value numbers
    pub fn for_enums() -> Self { Self { max: MAX_ENUM_VALUE_NUMBER } }

    /// Largest number this validator accepts
    pub fn max(&self) -> i64 { self.max }

    /// Normalize the reserved ranges and names declared by `owner`.
    pub fn validate(
        &self,
        owner: &str,
        ranges: &[ReservedRangeDef],
        names: &[String],
    ) -> Result<Reserved> {
        Ok(Reserved {
            ranges: normalize_reserved_ranges(owner, ranges, self.max)?,
            names: normalize_reserved_names(owner, names)?,
        })
    }
}

/// Validate, sort and coalesce reserved ranges.
///
/// A range ending exactly at `max` becomes open-ended. Adjacent ranges
/// (`start == previous.end + 1`) are joined; overlapping ranges are rejected.
pub fn normalize_reserved_ranges(
    owner: &str,
    ranges: &[ReservedRangeDef],
    max: i64,
) -> Result<Vec<ReservedRange>> {
    let mut checked = Vec::with_capacity(ranges.len());
    for range in ranges {
        if range.start > max {
            return Err(AnalysisError::ReservedStartAboveMax {
                owner: owner.to_string(),
                start: range.start,
                max,
            });
        }
        let end = match range.end {
            Some(end) if end > max =>
                return Err(AnalysisError::ReservedEndAboveMax {
                    owner: owner.to_string(),
                    end,
                    max,
                }),
            Some(end) if end < range.start =>
                return Err(AnalysisError::ReservedStartAfterEnd {
                    owner: owner.to_string(),
                    start: range.start,
                    end,
                }),
            Some(end) if end == max => None,
            end => end,
        };
        checked.push(ReservedRange { start: range.start, end });
    }
    checked.sort_by_key(|range| range.start);

    let mut result: Vec<ReservedRange> = Vec::with_capacity(checked.len());
    for range in checked {
        if let Some(prev) = result.last_mut() {
            let prev_end = match prev.end {
                Some(prev_end) if range.start > prev_end => prev_end,
                _ =>
                    return Err(AnalysisError::OverlappingReservedRanges {
                        owner: owner.to_string(),
                        start: range.start,
                    }),
            };
            if range.start == prev_end + 1 {
                prev.end = range.end;
                continue;
            }
        }
        result.push(range);
    }
    Ok(result)
}

/// Reject duplicate reserved names and return the rest sorted.
pub fn normalize_reserved_names(owner: &str, names: &[String]) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name.clone()) {
            return Err(AnalysisError::DuplicateReservedName {
                owner: owner.to_string(),
                name: name.clone(),
            });
        }
    }
    Ok(seen.into_iter().collect())
}
