//! Depth-first traversal over the IR tree.
//!
//! Implement [`Visitor`] and override the hooks you care about. Every default hook
//! calls the matching `walk_*` function, which descends into all children, so an
//! override that still wants the subtree visited must call `walk_*` itself.

use crate::{
    CustomOptionDef, EnumDef, EnumValueDef, FieldDef, FileDef, MessageDef, MethodDef, OneofDef,
    OptionDef, ServiceDef, TypeRef,
};

/// Hooks invoked for every node of an IR file.
pub trait Visitor {
    /// Called for the root file.
    fn visit_file(&mut self, file: &FileDef) { walk_file(self, file) }

    /// Called for every message, at any nesting depth.
    fn visit_message(&mut self, message: &MessageDef) { walk_message(self, message) }

    /// Called for every enum, at any nesting depth.
    fn visit_enum(&mut self, enum_def: &EnumDef) { walk_enum(self, enum_def) }

    /// Called for every enum constant.
    fn visit_enum_value(&mut self, value: &EnumValueDef) { walk_enum_value(self, value) }

    /// Called for every field, including oneof members.
    fn visit_field(&mut self, field: &FieldDef) { walk_field(self, field) }

    /// Called for every oneof group.
    fn visit_oneof(&mut self, oneof: &OneofDef) { walk_oneof(self, oneof) }

    /// Called for every service.
    fn visit_service(&mut self, service: &ServiceDef) { walk_service(self, service) }

    /// Called for every RPC method.
    fn visit_method(&mut self, method: &MethodDef) { walk_method(self, method) }

    /// Called for every custom option declaration.
    fn visit_custom_option(&mut self, custom: &CustomOptionDef) {
        walk_custom_option(self, custom)
    }

    /// Called for every option attached to any declaration.
    fn visit_option(&mut self, option: &OptionDef) { walk_option(self, option) }

    /// Called for every type reference.
    fn visit_type_ref(&mut self, _type_ref: &TypeRef) {}
}

fn walk_options<V: Visitor + ?Sized>(visitor: &mut V, options: &[OptionDef]) {
    for option in options {
        visitor.visit_option(option);
    }
}

/// Visit the children of a file.
pub fn walk_file<V: Visitor + ?Sized>(visitor: &mut V, file: &FileDef) {
    for enum_def in &file.enums {
        visitor.visit_enum(enum_def);
    }
    for message in &file.messages {
        visitor.visit_message(message);
    }
    for service in &file.services {
        visitor.visit_service(service);
    }
    for custom in &file.custom_options {
        visitor.visit_custom_option(custom);
    }
    walk_options(visitor, &file.options);
}

/// Visit the children of a message.
pub fn walk_message<V: Visitor + ?Sized>(visitor: &mut V, message: &MessageDef) {
    for enum_def in &message.enums {
        visitor.visit_enum(enum_def);
    }
    for nested in &message.messages {
        visitor.visit_message(nested);
    }
    for oneof in &message.oneofs {
        visitor.visit_oneof(oneof);
    }
    for field in &message.fields {
        visitor.visit_field(field);
    }
    walk_options(visitor, &message.options);
}

/// Visit the children of an enum.
pub fn walk_enum<V: Visitor + ?Sized>(visitor: &mut V, enum_def: &EnumDef) {
    for value in &enum_def.values {
        visitor.visit_enum_value(value);
    }
    walk_options(visitor, &enum_def.options);
}

/// Visit the children of an enum constant.
pub fn walk_enum_value<V: Visitor + ?Sized>(visitor: &mut V, value: &EnumValueDef) {
    walk_options(visitor, &value.options);
}

/// Visit the children of a field.
pub fn walk_field<V: Visitor + ?Sized>(visitor: &mut V, field: &FieldDef) {
    visitor.visit_type_ref(&field.field_type);
    walk_options(visitor, &field.options);
}

/// Visit the children of a oneof group.
pub fn walk_oneof<V: Visitor + ?Sized>(visitor: &mut V, oneof: &OneofDef) {
    for field in &oneof.fields {
        visitor.visit_field(field);
    }
    walk_options(visitor, &oneof.options);
}

/// Visit the children of a service.
pub fn walk_service<V: Visitor + ?Sized>(visitor: &mut V, service: &ServiceDef) {
    for method in &service.methods {
        visitor.visit_method(method);
    }
    walk_options(visitor, &service.options);
}

/// Visit the children of an RPC method.
pub fn walk_method<V: Visitor + ?Sized>(visitor: &mut V, method: &MethodDef) {
    visitor.visit_type_ref(&method.input_type);
    visitor.visit_type_ref(&method.output_type);
    walk_options(visitor, &method.options);
}

/// Visit the children of a custom option declaration.
pub fn walk_custom_option<V: Visitor + ?Sized>(visitor: &mut V, custom: &CustomOptionDef) {
    visitor.visit_type_ref(&custom.value_type);
}

/// Visit the children of an option.
pub fn walk_option<V: Visitor + ?Sized>(visitor: &mut V, option: &OptionDef) {
    visitor.visit_type_ref(&option.extension);
}
