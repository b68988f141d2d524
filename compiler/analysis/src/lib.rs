#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protoweave Analysis and Transformation
//!
//! Lowers one schema IR file into the canonical proto3 AST. The individual phases
//! (path expansion, option canonicalization, reserved validation, import discovery)
//! live in their own modules; [`lower_file`] strings them together.

use thiserror::Error;

pub mod canonicalizer;
pub mod imports;
pub mod lower;
pub mod normalizer;
pub mod validator;

pub use canonicalizer::{merge_options, OptionCanonicalizer};
pub use imports::{collect_imports, ImportCollector};
pub use lower::{enum_zero_value_name, lower_file, FileLowering};
pub use normalizer::expand_path;
pub use validator::{normalize_reserved_names, normalize_reserved_ranges, ReservedValidator};

/// Semantic invariant violations detected while lowering IR.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A reserved range starts beyond the maximum number.
    #[error("reserved range in `{owner}` starts at {start}, above the maximum {max}")]
    ReservedStartAboveMax {
        /// Declaration owning the range
        owner: String,
        /// Offending start
        start: i64,
        /// Allowed maximum
        max: i64,
    },
    /// A reserved range ends beyond the maximum number.
    #[error("reserved range in `{owner}` ends at {end}, above the maximum {max}")]
    ReservedEndAboveMax {
        /// Declaration owning the range
        owner: String,
        /// Offending end
        end: i64,
        /// Allowed maximum
        max: i64,
    },
    /// A reserved range ends before it starts.
    #[error("reserved range {start} to {end} in `{owner}` ends before it starts")]
    ReservedStartAfterEnd {
        /// Declaration owning the range
        owner: String,
        /// Range start
        start: i64,
        /// Range end
        end: i64,
    },
    /// Two reserved ranges share at least one number.
    #[error("reserved ranges in `{owner}` overlap at {start}")]
    OverlappingReservedRanges {
        /// Declaration owning the ranges
        owner: String,
        /// Start of the range that overlaps its predecessor
        start: i64,
    },
    /// A reserved name is listed more than once.
    #[error("reserved name `{name}` is specified multiple times in `{owner}`")]
    DuplicateReservedName {
        /// Declaration owning the names
        owner: String,
        /// Repeated name
        name: String,
    },
}

/// Result alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
