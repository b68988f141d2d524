//! Protoweave schema IR
//!
//! One [`FileDef`] describes one `.proto` compilation unit. Every field may be absent
//! or `null` in the JSON input, in which case it takes its zero value.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::OptionValue;

use crate::de::nullable;

/// Errors raised while loading IR documents.
#[derive(Debug, Error)]
pub enum IrError {
    /// Failed to read an IR document from disk.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The document is not a valid IR file.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A reference to a scalar, a locally declared type, or an imported type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeRef {
    /// Type name (e.g. `int64`, `Color`, `Timestamp`)
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// File declaring the type, set only for imported types
    #[serde(deserialize_with = "nullable")]
    pub filename: String,
    /// Package of the declaring file, set only for imported types
    #[serde(deserialize_with = "nullable")]
    pub package: String,
}

impl TypeRef {
    /// Create a reference to a scalar or locally declared type.
    pub fn local(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Create a reference to a type declared in another file.
    pub fn imported(
        name: impl Into<String>,
        filename: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), filename: filename.into(), package: package.into() }
    }

    /// Package-qualified name, or the bare name when no package is set.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// An option attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionDef {
    /// The option (extension field) being set
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub extension: TypeRef,
    /// Optional dotted sub-field locator (e.g. `a.b.c`)
    #[serde(deserialize_with = "nullable")]
    pub path: String,
    /// Option value, with bytes and enum literal markers already normalized
    pub value: OptionValue,
}

impl OptionDef {
    /// Create an option without a sub-field path.
    pub fn new(extension: TypeRef, value: OptionValue) -> Self {
        Self { extension, path: String::new(), value }
    }

    /// Create an option that sets the sub-field at `path`.
    pub fn with_path(extension: TypeRef, path: impl Into<String>, value: OptionValue) -> Self {
        Self { extension, path: path.into(), value }
    }
}

/// An inclusive range of reserved numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservedRangeDef {
    /// First reserved number
    #[serde(deserialize_with = "nullable")]
    pub start: i64,
    /// Last reserved number; `None` means up to the maximum
    pub end: Option<i64>,
}

/// One compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDef {
    /// Output path of the file (e.g. `demo/echo.proto`)
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Proto package
    #[serde(deserialize_with = "nullable")]
    pub package: String,
    /// Top-level enums
    #[serde(deserialize_with = "nullable")]
    pub enums: Vec<EnumDef>,
    /// Top-level messages
    #[serde(deserialize_with = "nullable")]
    pub messages: Vec<MessageDef>,
    /// Services
    #[serde(deserialize_with = "nullable")]
    pub services: Vec<ServiceDef>,
    /// Custom option declarations
    #[serde(deserialize_with = "nullable")]
    pub custom_options: Vec<CustomOptionDef>,
    /// File-level options
    #[serde(deserialize_with = "nullable")]
    pub options: Vec<OptionDef>,
}

/// Message declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageDef {
    /// Message name
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Doc comment
    #[serde(deserialize_with = "nullable")]
    pub help: String,
    /// Nested enums
    #[serde(deserialize_with = "nullable")]
    pub enums: Vec<EnumDef>,
    /// Nested messages
    #[serde(deserialize_with = "nullable")]
    pub messages: Vec<MessageDef>,
    /// Oneof groups
    #[serde(deserialize_with = "nullable")]
    pub oneofs: Vec<OneofDef>,
    /// Fields outside any oneof
    #[serde(deserialize_with = "nullable")]
    pub fields: Vec<FieldDef>,
    /// Message options
    #[serde(deserialize_with = "nullable")]
    pub options: Vec<OptionDef>,
    /// Reserved field numbers
    #[serde(deserialize_with = "nullable")]
    pub reserved_ranges: Vec<ReservedRangeDef>,
    /// Reserved field names
    #[serde(deserialize_with = "nullable")]
    pub reserved_names: Vec<String>,
}

/// Enum declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumDef {
    /// Enum name
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Doc comment
    #[serde(deserialize_with = "nullable")]
    pub help: String,
    /// Enum constants in declaration order
    #[serde(deserialize_with = "nullable")]
    pub values: Vec<EnumValueDef>,
    /// Enum options
    #[serde(deserialize_with = "nullable")]
    pub options: Vec<OptionDef>,
    /// Reserved value numbers
    #[serde(deserialize_with = "nullable")]
    pub reserved_ranges: Vec<ReservedRangeDef>,
    /// Reserved value names
    #[serde(deserialize_with = "nullable")]
    pub reserved_names: Vec<String>,
}

/// Enum constant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumValueDef {
    /// Constant name
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Doc comment
    #[serde(deserialize_with = "nullable")]
    pub help: String,
    /// Constant number
    #[serde(deserialize_with = "nullable")]
    pub number: i64,
    /// Enum value options
    #[serde(deserialize_with = "nullable")]
    pub options: Vec<OptionDef>,
}

/// Field declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDef {
    /// Field name
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Doc comment
    #[serde(deserialize_with = "nullable")]
    pub help: String,
    /// Field number
    #[serde(deserialize_with = "nullable")]
    pub number: i64,
    /// Field type
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub field_type: TypeRef,
    /// Label such as `repeated` or `optional`; empty for singular fields
    #[serde(deserialize_with = "nullable")]
    pub label: String,
    /// Field options
    #[serde(deserialize_with = "nullable")]
    pub options: Vec<OptionDef>,
}

/// Oneof group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneofDef {
    /// Oneof name
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Doc comment
    #[serde(deserialize_with = "nullable")]
    pub help: String,
    /// Member fields
    #[serde(deserialize_with = "nullable")]
    pub fields: Vec<FieldDef>,
    /// Oneof options
    #[serde(deserialize_with = "nullable")]
    pub options: Vec<OptionDef>,
}

/// Service declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDef {
    /// Service name
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Doc comment
    #[serde(deserialize_with = "nullable")]
    pub help: String,
    /// RPC methods
    #[serde(deserialize_with = "nullable")]
    pub methods: Vec<MethodDef>,
    /// Service options
    #[serde(deserialize_with = "nullable")]
    pub options: Vec<OptionDef>,
}

/// RPC method declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodDef {
    /// Method name
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Doc comment
    #[serde(deserialize_with = "nullable")]
    pub help: String,
    /// Request message type
    #[serde(deserialize_with = "nullable")]
    pub input_type: TypeRef,
    /// Response message type
    #[serde(deserialize_with = "nullable")]
    pub output_type: TypeRef,
    /// Whether the request is a stream
    #[serde(deserialize_with = "nullable")]
    pub client_streaming: bool,
    /// Whether the response is a stream
    #[serde(deserialize_with = "nullable")]
    pub server_streaming: bool,
    /// Method options
    #[serde(deserialize_with = "nullable")]
    pub options: Vec<OptionDef>,
}

/// The descriptor options message a custom option extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// `google.protobuf.FileOptions`
    FileOption,
    /// `google.protobuf.MessageOptions`
    MessageOption,
    /// `google.protobuf.FieldOptions`
    FieldOption,
    /// `google.protobuf.OneofOptions`
    OneofOption,
    /// `google.protobuf.EnumOptions`
    EnumOption,
    /// `google.protobuf.EnumValueOptions`
    EnumValueOption,
    /// `google.protobuf.ServiceOptions`
    ServiceOption,
    /// `google.protobuf.MethodOptions`
    MethodOption,
}

impl OptionKind {
    /// Full name of the descriptor message this option kind extends.
    pub fn extendee(&self) -> &'static str {
        match self {
            OptionKind::FileOption => "google.protobuf.FileOptions",
            OptionKind::MessageOption => "google.protobuf.MessageOptions",
            OptionKind::FieldOption => "google.protobuf.FieldOptions",
            OptionKind::OneofOption => "google.protobuf.OneofOptions",
            OptionKind::EnumOption => "google.protobuf.EnumOptions",
            OptionKind::EnumValueOption => "google.protobuf.EnumValueOptions",
            OptionKind::ServiceOption => "google.protobuf.ServiceOptions",
            OptionKind::MethodOption => "google.protobuf.MethodOptions",
        }
    }
}

/// Declaration of a custom option, i.e. an extension of a descriptor options message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomOptionDef {
    /// Extension field name
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Doc comment
    #[serde(default, deserialize_with = "nullable")]
    pub help: String,
    /// Extension field number
    #[serde(default, deserialize_with = "nullable")]
    pub number: i64,
    /// Extension field type
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub value_type: TypeRef,
    /// Which descriptor options message is extended
    #[serde(rename = "option_type")]
    pub kind: OptionKind,
    /// Label such as `repeated`; empty for singular options
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
}

impl FileDef {
    /// Decode a single IR file document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, IrError> { Ok(serde_json::from_str(json)?) }

    /// Decode a single IR file document from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, IrError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load a single IR file document from disk.
    pub fn from_file(path: &Path) -> Result<Self, IrError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save the IR document as pretty-printed JSON.
    pub fn to_file(&self, path: &Path) -> Result<(), IrError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        // Ensure file ends with a newline (POSIX standard)
        use std::io::Write;
        writeln!(file)?;
        Ok(())
    }
}
