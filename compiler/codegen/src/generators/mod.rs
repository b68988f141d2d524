//! Generators translating AST nodes into layout bodies.

pub mod declaration;
pub mod doc_comment;
pub mod file;
pub mod options;
