//! IR to AST lowering
//!
//! Produces the canonical AST for one IR file: options merged, reserved numbers and
//! names normalized, enum zero values synthesized, children in fixed group order and
//! imports discovered.

use ast::{Declaration, DeclarationKind, FieldDetails, File, MethodDetails, Reserved};
use convert_case::{Case, Casing};
use ir::{
    CustomOptionDef, EnumDef, EnumValueDef, FieldDef, FileDef, MessageDef, MethodDef, OneofDef,
    ServiceDef,
};
use tracing::debug;

use crate::canonicalizer::OptionCanonicalizer;
use crate::imports::collect_imports;
use crate::validator::ReservedValidator;
use crate::Result;

/// Syntax level of every generated file.
pub const SYNTAX: &str = "proto3";

/// Name of the synthesized zero constant of enum `enum_name`.
///
/// `Color` becomes `COLOR_UNSPECIFIED`. Digits form their own word and an acronym
/// ends before its last capital, so `IPv6Kind` becomes `I_PV_6_KIND_UNSPECIFIED`.
pub fn enum_zero_value_name(enum_name: &str) -> String {
    format!("{enum_name}Unspecified").to_case(Case::UpperSnake)
}

/// Lowers IR files into AST files.
#[derive(Default, Debug, Clone)]
pub struct FileLowering {
    options: OptionCanonicalizer,
}

impl FileLowering {
    /// Create a new lowering phase
    pub fn new() -> Self { Self { options: OptionCanonicalizer::new() } }

    /// Lower one IR file.
    pub fn lower(&self, file: &FileDef) -> Result<File> {
        let mut declarations = Vec::with_capacity(
            file.custom_options.len() + file.enums.len() + file.messages.len() + file.services.len(),
        );
        declarations.extend(file.custom_options.iter().map(|custom| self.custom_option(custom)));
        for enum_def in &file.enums {
            declarations.push(self.enum_decl(enum_def)?);
        }
        for message in &file.messages {
            declarations.push(self.message(message)?);
        }
        declarations.extend(file.services.iter().map(|service| self.service(service)));

        let imports = collect_imports(file);
        debug!(
            file = %file.name,
            declarations = declarations.len(),
            imports = imports.len(),
            "lowered IR file"
        );

        Ok(File {
            name: file.name.clone(),
            package: file.package.clone(),
            syntax: SYNTAX.to_string(),
            imports,
            declarations,
            options: self.options.merge(&file.options),
        })
    }

    fn custom_option(&self, custom: &CustomOptionDef) -> Declaration {
        let field = Declaration::new(
            custom.name.clone(),
            DeclarationKind::Field {
                number: custom.number,
                details: FieldDetails {
                    type_name: custom.value_type.full_name(),
                    label: custom.label.clone(),
                },
            },
        )
        .with_help(custom.help.clone());
        Declaration::new(
            custom.kind.extendee(),
            DeclarationKind::Extension { declarations: vec![field] },
        )
    }

    fn enum_decl(&self, enum_def: &EnumDef) -> Result<Declaration> {
        let mut values = Vec::with_capacity(enum_def.values.len() + 1);
        if !enum_def.values.iter().any(|value| value.number == 0) {
            let name = enum_zero_value_name(&enum_def.name);
            debug!(enum_name = %enum_def.name, zero = %name, "synthesized enum zero value");
            values.push(Declaration::new(name, DeclarationKind::EnumValue { number: 0 }));
        }
        values.extend(enum_def.values.iter().map(|value| self.enum_value(value)));

        let reserved = ReservedValidator::for_enums().validate(
            &enum_def.name,
            &enum_def.reserved_ranges,
            &enum_def.reserved_names,
        )?;
        Ok(Declaration::new(
            enum_def.name.clone(),
            DeclarationKind::Enum { declarations: values, reserved },
        )
        .with_help(enum_def.help.clone())
        .with_options(self.options.merge(&enum_def.options)))
    }

    fn enum_value(&self, value: &EnumValueDef) -> Declaration {
        Declaration::new(value.name.clone(), DeclarationKind::EnumValue { number: value.number })
            .with_help(value.help.clone())
            .with_options(self.options.merge(&value.options))
    }

    fn message(&self, message: &MessageDef) -> Result<Declaration> {
        let mut children = Vec::with_capacity(
            message.enums.len() + message.messages.len() + message.oneofs.len() + message.fields.len(),
        );
        for enum_def in &message.enums {
            children.push(self.enum_decl(enum_def)?);
        }
        for nested in &message.messages {
            children.push(self.message(nested)?);
        }
        children.extend(message.oneofs.iter().map(|oneof| self.oneof(oneof)));
        children.extend(message.fields.iter().map(|field| self.field(field)));

        let reserved: Reserved = ReservedValidator::for_messages().validate(
            &message.name,
            &message.reserved_ranges,
            &message.reserved_names,
        )?;
        Ok(Declaration::new(
            message.name.clone(),
            DeclarationKind::Message { declarations: children, reserved },
        )
        .with_help(message.help.clone())
        .with_options(self.options.merge(&message.options)))
    }

    fn field(&self, field: &FieldDef) -> Declaration {
        Declaration::new(
            field.name.clone(),
            DeclarationKind::Field {
                number: field.number,
                details: FieldDetails {
                    type_name: field.field_type.full_name(),
                    label: field.label.clone(),
                },
            },
        )
        .with_help(field.help.clone())
        .with_options(self.options.merge(&field.options))
    }

    fn oneof(&self, oneof: &OneofDef) -> Declaration {
        let fields = oneof.fields.iter().map(|field| self.field(field)).collect();
        Declaration::new(oneof.name.clone(), DeclarationKind::Oneof { declarations: fields })
            .with_help(oneof.help.clone())
            .with_options(self.options.merge(&oneof.options))
    }

    fn service(&self, service: &ServiceDef) -> Declaration {
        let methods = service.methods.iter().map(|method| self.method(method)).collect();
        Declaration::new(service.name.clone(), DeclarationKind::Service { declarations: methods })
            .with_help(service.help.clone())
            .with_options(self.options.merge(&service.options))
    }

    fn method(&self, method: &MethodDef) -> Declaration {
        Declaration::new(
            method.name.clone(),
            DeclarationKind::Method {
                details: MethodDetails {
                    input_type: method.input_type.full_name(),
                    output_type: method.output_type.full_name(),
                    client_streaming: method.client_streaming,
                    server_streaming: method.server_streaming,
                },
            },
        )
        .with_help(method.help.clone())
        .with_options(self.options.merge(&method.options))
    }
}

/// Lower one IR file into its canonical AST.
pub fn lower_file(file: &FileDef) -> Result<File> { FileLowering::new().lower(file) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_value_names() {
        assert_eq!(enum_zero_value_name("Color"), "COLOR_UNSPECIFIED");
        assert_eq!(enum_zero_value_name("PaymentState"), "PAYMENT_STATE_UNSPECIFIED");
    }

    #[test]
    fn test_zero_value_names_split_digits_and_acronyms() {
        assert_eq!(enum_zero_value_name("Version2"), "VERSION_2_UNSPECIFIED");
        assert_eq!(enum_zero_value_name("IPv6Kind"), "I_PV_6_KIND_UNSPECIFIED");
        assert_eq!(enum_zero_value_name("HTTPMethod"), "HTTP_METHOD_UNSPECIFIED");
    }
}
