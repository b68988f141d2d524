#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Shared primitives for the Protoweave compiler.
//!
//! This crate holds the small set of definitions that both the IR and the AST layers
//! agree on: the closed `OptionValue` union used for custom option values, the marker
//! normalization that turns front-end JSON into that union, and the numeric limits of
//! the proto3 language.

/// Dynamic option values and their JSON normalization.
///
/// Front-end evaluators emit option values as arbitrary JSON. Byte strings and enum
/// literals have no native JSON shape, so they travel as reserved marker objects that
/// are rewritten into dedicated variants while decoding.
pub mod value;

/// Re-export the option value union for convenience.
pub use value::{OptionValue, ValueError};

/// Largest field number accepted by protoc (2^29 - 1).
pub const MAX_FIELD_NUMBER: i64 = 536_870_911;

/// Largest value accepted for reserved enum numbers (2^31 - 1).
pub const MAX_ENUM_VALUE_NUMBER: i64 = 2_147_483_647;

/// Import path of the descriptor definitions that custom options extend.
pub const DESCRIPTOR_PROTO: &str = "google/protobuf/descriptor.proto";

/// Marker tag identifying a byte-string literal object.
pub const BYTES_LITERAL_MARKER: &str = "__bytes_literal__";

/// Marker tag identifying an enum-value literal object.
pub const ENUM_VALUE_LITERAL_MARKER: &str = "__enum_value_literal__";
