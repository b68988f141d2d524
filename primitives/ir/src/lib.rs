#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protoweave Intermediate Representation (IR)
//!
//! This crate defines the JSON-shaped schema description that front-end evaluators
//! produce: files, messages, enums, services, custom options and their option values.
//! The IR is pure data. It is decoded once per output file and handed to the
//! transformer in `protoweave-analysis`, which turns it into a printable AST.

pub mod schema_ir;
pub mod visit;

mod de;

// Re-export the main IR types for convenience
pub use schema_ir::*;
pub use visit::Visitor;
