use std::collections::BTreeMap;

use ast::{
    Declaration, DeclarationKind, FieldDetails, File, MethodDetails, OptionValue, ProtoOption,
    Reserved, ReservedRange,
};
use protoweave_codegen::{render_file, CodegenError};

fn field(name: &str, type_name: &str, number: i64) -> Declaration {
    Declaration::new(
        name,
        DeclarationKind::Field {
            number,
            details: FieldDetails { type_name: type_name.to_string(), label: String::new() },
        },
    )
}

fn message(name: &str, declarations: Vec<Declaration>) -> Declaration {
    Declaration::new(name, DeclarationKind::Message { declarations, reserved: Reserved::default() })
}

fn file(declarations: Vec<Declaration>) -> File {
    File {
        name: "demo/test.proto".to_string(),
        package: "demo".to_string(),
        syntax: "proto3".to_string(),
        declarations,
        ..Default::default()
    }
}

fn string(s: &str) -> OptionValue { OptionValue::String(s.to_string()) }

fn render(file: &File) -> String { render_file(file).expect("renders") }

#[test]
fn test_render_documented_message_with_reserved() {
    let echo = Declaration::new(
        "EchoRequest",
        DeclarationKind::Message {
            declarations: vec![
                field("message", "string", 1).with_help("The message to get echoed."),
                field("priority", "int64", 2).with_help("The priority of the EchoRequest."),
            ],
            reserved: Reserved {
                ranges: vec![
                    ReservedRange { start: 5, end: Some(5) },
                    ReservedRange { start: 6, end: Some(8) },
                    ReservedRange { start: 10, end: None },
                ],
                names: vec!["foo".to_string()],
            },
        },
    )
    .with_help("Request to send an echo back.");
    let mut f = file(vec![echo]);
    f.package = "foo".to_string();

    let expected = r#"// Generated by protoweavec. DO NOT EDIT!

syntax = "proto3";

package foo;

// Request to send an echo back.
message EchoRequest {
    // The message to get echoed.
    string message = 1;

    // The priority of the EchoRequest.
    int64 priority = 2;

    reserved 5;
    reserved 6 to 8;
    reserved 10 to max;
    reserved "foo";
}
"#;
    assert_eq!(render(&f), expected);
}

#[test]
fn test_header_groups() {
    let mut f = file(vec![message("Empty", vec![])]);
    f.options = vec![
        ProtoOption::new("go_package", string("example.com/demo")),
        ProtoOption::new("demo.file_flag", OptionValue::Bool(true)),
    ];
    f.imports = vec!["a.proto".to_string(), "b.proto".to_string()];

    let expected = r#"// Generated by protoweavec. DO NOT EDIT!

syntax = "proto3";

package demo;

option go_package = "example.com/demo";
option (demo.file_flag) = true;

import "a.proto";
import "b.proto";

message Empty {

}
"#;
    assert_eq!(render(&f), expected);
}

#[test]
fn test_short_options_collapse_inline() {
    let name = field("name", "string", 1).with_options(vec![
        ProtoOption::new("deprecated", OptionValue::Bool(true)),
        ProtoOption::new("json_name", string("n")),
    ]);
    let text = render(&file(vec![message("M", vec![name])]));
    assert!(text.contains("message M {\n    string name = 1 [deprecated = true, json_name = \"n\"];\n}\n"));
}

#[test]
fn test_long_option_value_expands() {
    let note = "x".repeat(70);
    let name =
        field("name", "string", 1).with_options(vec![ProtoOption::new("demo.note", string(&note))]);
    let text = render(&file(vec![message("M", vec![name])]));
    let expected =
        format!("message M {{\n    string name = 1 [\n        (demo.note) = \"{note}\"\n    ];\n}}\n");
    assert!(text.ends_with(&expected), "got:\n{text}");
}

#[test]
fn test_http_option_always_expands() {
    let mut get = BTreeMap::new();
    get.insert("get".to_string(), string("/a"));
    let method = Declaration::new(
        "A",
        DeclarationKind::Method {
            details: MethodDetails {
                input_type: "B".to_string(),
                output_type: "C".to_string(),
                ..Default::default()
            },
        },
    )
    .with_options(vec![ProtoOption::new("google.api.http", OptionValue::Mapping(get))]);
    let service =
        Declaration::new("S", DeclarationKind::Service { declarations: vec![method] });

    let text = render(&file(vec![service]));
    let expected = r#"service S {
    rpc A(B) returns (C) {
        option (google.api.http) = {
            get: "/a"
        };
    };
}
"#;
    assert!(text.ends_with(expected), "got:\n{text}");
}

#[test]
fn test_nested_option_values() {
    let mut inner = BTreeMap::new();
    inner.insert("min".to_string(), OptionValue::Number(1.into()));
    let mut outer = BTreeMap::new();
    outer.insert("tags".to_string(), OptionValue::Sequence(vec![string("a"), string("b")]));
    outer.insert("len".to_string(), OptionValue::Mapping(inner));
    outer.insert("kind".to_string(), OptionValue::EnumLiteral("KIND_A".to_string()));
    let value = field("v", "bytes", 3).with_options(vec![
        ProtoOption::new("demo.rules", OptionValue::Mapping(outer)),
        ProtoOption {
            name: "demo.ext".into(),
            path: "sub.flag".into(),
            value: OptionValue::Bytes(vec![0, b'a']),
        },
    ]);

    let text = render(&file(vec![message("M", vec![value])]));
    let expected = r#"message M {
    bytes v = 3 [
        (demo.rules) = {kind: KIND_A, len: {min: 1}, tags: ["a", "b"]},
        (demo.ext).sub.flag = "\x00a"
    ];
}
"#;
    assert!(text.ends_with(expected), "got:\n{text}");
}

#[test]
fn test_streaming_methods_and_enum_values() {
    let method = Declaration::new(
        "Watch",
        DeclarationKind::Method {
            details: MethodDetails {
                input_type: "google.protobuf.Empty".to_string(),
                output_type: "Event".to_string(),
                client_streaming: true,
                server_streaming: true,
            },
        },
    );
    let service = Declaration::new("Events", DeclarationKind::Service { declarations: vec![method] });
    let color = Declaration::new(
        "Color",
        DeclarationKind::Enum {
            declarations: vec![
                Declaration::new("COLOR_UNSPECIFIED", DeclarationKind::EnumValue { number: 0 }),
                Declaration::new("RED", DeclarationKind::EnumValue { number: 1 })
                    .with_options(vec![ProtoOption::new("deprecated", OptionValue::Bool(true))]),
            ],
            reserved: Reserved::default(),
        },
    );

    let text = render(&file(vec![color, service]));
    assert!(text.contains(
        "enum Color {\n    COLOR_UNSPECIFIED = 0;\n    RED = 1 [deprecated = true];\n}\n\nservice Events {"
    ));
    assert!(text.contains("    rpc Watch(stream google.protobuf.Empty) returns (stream Event);\n"));
}

#[test]
fn test_multiline_help_and_separation() {
    let first = field("a", "int32", 1).with_help("First line.\n\nSecond paragraph.");
    let second = field("b", "int32", 2);
    let third = field("c", "int32", 3).with_help("  Padded.  ");
    let text = render(&file(vec![message("M", vec![first, second, third])]));
    assert!(text.contains(
        "message M {\n    // First line.\n    //\n    // Second paragraph.\n    int32 a = 1;\n    int32 b = 2;\n\n    // Padded.\n    int32 c = 3;\n}"
    ));
}

#[test]
fn test_message_options_precede_children() {
    let m = message("M", vec![field("a", "int32", 1)])
        .with_options(vec![ProtoOption::new("deprecated", OptionValue::Bool(true))]);
    let text = render(&file(vec![m]));
    assert!(text.contains("message M {\n    option deprecated = true;\n\n    int32 a = 1;\n}"));
}

#[test]
fn test_path_on_long_option_is_rejected() {
    let m = message("M", vec![]).with_options(vec![ProtoOption {
        name: "demo.opt".into(),
        path: "x".into(),
        value: OptionValue::Bool(true),
    }]);
    assert_eq!(
        render_file(&file(vec![m])),
        Err(CodegenError::PathOnLongOption { option: "demo.opt".into() })
    );
}

#[test]
fn test_null_value_is_rejected() {
    let f = field("a", "int32", 1).with_options(vec![ProtoOption::new("demo.opt", OptionValue::Null)]);
    let err = render_file(&file(vec![message("M", vec![f])])).expect_err("null cannot render");
    assert!(matches!(err, CodegenError::UnsupportedValue { kind: "null", .. }));
}

#[test]
fn test_rendering_is_deterministic() {
    let mut map = BTreeMap::new();
    map.insert("zeta".to_string(), OptionValue::Number(2.into()));
    map.insert("alpha".to_string(), OptionValue::Number(1.into()));
    let m = message("M", vec![]).with_options(vec![ProtoOption::new("demo.o", OptionValue::Mapping(map))]);
    let f = file(vec![m]);

    let first = render(&f);
    assert_eq!(first, render(&f.clone()));
    assert!(first.contains("option (demo.o) = {alpha: 1, zeta: 2};"));
}
