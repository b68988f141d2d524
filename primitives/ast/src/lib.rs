#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Protoweave proto3 AST
//!
//! The canonical, printer-ready declaration tree. Values of these types are produced
//! once per IR file by the transformer and consumed once by the printer; nothing
//! mutates them in between.

pub use types::OptionValue;

/// A `.proto` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
    /// Output path of the file
    pub name: String,
    /// Proto package
    pub package: String,
    /// Syntax level, always `proto3` for generated files
    pub syntax: String,
    /// Sorted, deduplicated import paths
    pub imports: Vec<String>,
    /// Top-level declarations in output order
    pub declarations: Vec<Declaration>,
    /// File-level options
    pub options: Vec<ProtoOption>,
}

/// An option attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtoOption {
    /// Full option name; names containing a dot are extensions
    pub name: String,
    /// Sub-field path, only legal for short-form (bracketed) options
    pub path: String,
    /// Option value
    pub value: OptionValue,
}

impl ProtoOption {
    /// Create an option without a sub-field path.
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self { name: name.into(), path: String::new(), value }
    }

    /// Whether the option refers to an extension and must be parenthesized.
    pub fn is_extension(&self) -> bool { self.name.contains('.') }
}

/// An inclusive range of reserved numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedRange {
    /// First reserved number
    pub start: i64,
    /// Last reserved number; `None` renders as `max`
    pub end: Option<i64>,
}

/// Reserved numbers and names of a message or enum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reserved {
    /// Sorted, non-overlapping, coalesced ranges
    pub ranges: Vec<ReservedRange>,
    /// Sorted, unique names
    pub names: Vec<String>,
}

impl Reserved {
    /// Whether nothing is reserved.
    pub fn is_empty(&self) -> bool { self.ranges.is_empty() && self.names.is_empty() }
}

/// Type and label of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDetails {
    /// Full type name
    pub type_name: String,
    /// Label such as `repeated`; empty for singular fields
    pub label: String,
}

/// Signature of an RPC method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodDetails {
    /// Full request type name
    pub input_type: String,
    /// Full response type name
    pub output_type: String,
    /// Whether the request is streamed
    pub client_streaming: bool,
    /// Whether the response is streamed
    pub server_streaming: bool,
}

/// Variant-specific payload of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    /// `message` block
    Message {
        /// Nested enums, messages, oneofs and fields, in that order
        declarations: Vec<Declaration>,
        /// Reserved field numbers and names
        reserved: Reserved,
    },
    /// `enum` block
    Enum {
        /// Enum constants
        declarations: Vec<Declaration>,
        /// Reserved value numbers and names
        reserved: Reserved,
    },
    /// `extend` block
    Extension {
        /// Extension fields
        declarations: Vec<Declaration>,
    },
    /// `oneof` block
    Oneof {
        /// Member fields
        declarations: Vec<Declaration>,
    },
    /// `service` block
    Service {
        /// RPC methods
        declarations: Vec<Declaration>,
    },
    /// Field line
    Field {
        /// Field number
        number: i64,
        /// Type and label
        details: FieldDetails,
    },
    /// Enum constant line
    EnumValue {
        /// Constant number
        number: i64,
    },
    /// `rpc` line
    Method {
        /// Request and response types
        details: MethodDetails,
    },
}

impl DeclarationKind {
    /// Keyword opening a block declaration, `None` for line declarations.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            DeclarationKind::Message { .. } => Some("message"),
            DeclarationKind::Enum { .. } => Some("enum"),
            DeclarationKind::Extension { .. } => Some("extend"),
            DeclarationKind::Oneof { .. } => Some("oneof"),
            DeclarationKind::Service { .. } => Some("service"),
            DeclarationKind::Field { .. }
            | DeclarationKind::EnumValue { .. }
            | DeclarationKind::Method { .. } => None,
        }
    }

    /// Child declarations of a block declaration.
    pub fn declarations(&self) -> &[Declaration] {
        match self {
            DeclarationKind::Message { declarations, .. }
            | DeclarationKind::Enum { declarations, .. }
            | DeclarationKind::Extension { declarations }
            | DeclarationKind::Oneof { declarations }
            | DeclarationKind::Service { declarations } => declarations,
            _ => &[],
        }
    }

    /// Reserved numbers and names; only messages and enums carry them.
    pub fn reserved(&self) -> Option<&Reserved> {
        match self {
            DeclarationKind::Message { reserved, .. } | DeclarationKind::Enum { reserved, .. } =>
                Some(reserved),
            _ => None,
        }
    }
}

/// A named declaration with its doc comment and options.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Declared name
    pub name: String,
    /// Doc comment text, possibly multi-line
    pub help: String,
    /// Merged options
    pub options: Vec<ProtoOption>,
    /// Variant payload
    pub kind: DeclarationKind,
}

impl Declaration {
    /// Create a declaration without help text or options.
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self { name: name.into(), help: String::new(), options: Vec::new(), kind }
    }

    /// Attach doc comment text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Attach options.
    pub fn with_options(mut self, options: Vec<ProtoOption>) -> Self {
        self.options = options;
        self
    }
}
