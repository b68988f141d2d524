use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const ECHO_IR: &str = r#"{
    "name": "demo/echo.proto",
    "package": "demo",
    "messages": [{
        "name": "EchoRequest",
        "help": "Request to send an echo back.",
        "fields": [{"name": "message", "number": 1, "type": {"name": "string"}}]
    }]
}"#;

fn protoweavec(workdir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("protoweavec"));
    cmd.current_dir(workdir);
    // An empty config file keeps the user's own configuration out of the run.
    let config = workdir.join("protoweave.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    cmd.arg("--config").arg(config);
    cmd
}

fn make_executable(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }
}

/// Install a shell script named `name` in `bin_dir` and return a PATH containing it.
fn fake_tool(bin_dir: &Path, name: &str, body: &str) -> String {
    fs::create_dir_all(bin_dir).unwrap();
    let path = bin_dir.join(name);
    {
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "#!/bin/sh").unwrap();
        writeln!(f, "{body}").unwrap();
    }
    make_executable(&path);
    let system_path = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", bin_dir.display(), system_path)
}

#[test]
fn test_json_input_writes_proto() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("echo.json"), ECHO_IR).unwrap();

    protoweavec(temp.path()).args(["--proto_out=gen", "echo.json"]).assert().success();

    let generated = fs::read_to_string(temp.path().join("gen/demo/echo.proto")).unwrap();
    assert!(generated.starts_with("// Generated by protoweavec. DO NOT EDIT!\n"));
    assert!(generated.contains(
        "// Request to send an echo back.\nmessage EchoRequest {\n    string message = 1;\n}\n"
    ));
}

#[test]
fn test_missing_proto_out_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("echo.json"), ECHO_IR).unwrap();

    protoweavec(temp.path())
        .arg("echo.json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must set --proto_out"));
}

#[test]
fn test_output_dir_from_config() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("echo.json"), ECHO_IR).unwrap();
    fs::write(temp.path().join("protoweave.toml"), "[output]\ndir = \"configured\"\n").unwrap();

    protoweavec(temp.path()).arg("echo.json").assert().success();

    assert!(temp.path().join("configured/demo/echo.proto").is_file());
}

#[test]
fn test_invalid_ir_is_reported() {
    let temp = TempDir::new().unwrap();
    let bad = r#"{"name": "bad.proto", "messages": [{"name": "Bad", "reserved_ranges": [{"start": 9, "end": 3}]}]}"#;
    fs::write(temp.path().join("bad.json"), bad).unwrap();

    protoweavec(temp.path())
        .args(["--proto_out", "gen", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.proto"));
    assert!(!temp.path().join("gen/bad.proto").exists());
}

#[test]
fn test_keep_going_writes_the_good_files() {
    let temp = TempDir::new().unwrap();
    let bundle = format!(
        r#"{{"good.jsonnet": [{ECHO_IR}], "bad.jsonnet": [{{"name": "bad.proto", "enums": [{{"name": "E", "reserved_ranges": [{{"start": 3, "end": 1}}]}}]}}]}}"#
    );
    fs::write(temp.path().join("bundle.json"), bundle).unwrap();

    protoweavec(temp.path())
        .args(["--proto_out", "gen", "--keep-going", "bundle.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 file(s) failed to compile"));
    assert!(temp.path().join("gen/demo/echo.proto").is_file());
}

#[test]
fn test_protoc_receives_generated_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("echo.json"), ECHO_IR).unwrap();
    let log = temp.path().join("protoc_args.txt");
    let path = fake_tool(&temp.path().join("bin"), "protoc", &format!("echo \"$@\" > {}", log.display()));

    protoweavec(temp.path())
        .env("PATH", path)
        .args(["--proto_out=gen", "echo.json", "--", "--go_out=out", "-Igen"])
        .assert()
        .success();

    let args = fs::read_to_string(&log).unwrap();
    assert_eq!(args.trim(), "--go_out=out -Igen demo/echo.proto");
}

#[test]
fn test_protoc_skipped_without_output_flag() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("echo.json"), ECHO_IR).unwrap();
    let log = temp.path().join("protoc_args.txt");
    let path = fake_tool(&temp.path().join("bin"), "protoc", &format!("echo ran > {}", log.display()));

    protoweavec(temp.path())
        .env("PATH", path)
        .args(["--proto_out=gen", "echo.json", "--", "-Igen"])
        .assert()
        .success();
    assert!(!log.exists());
}

#[test]
fn test_failing_protoc_fails_the_run() {
    let temp = TempDir::new().unwrap();
    let path = fake_tool(&temp.path().join("bin"), "protoc", "exit 3");

    protoweavec(temp.path())
        .env("PATH", path)
        .args(["--", "--go_out=out", "a.proto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("protoc exited with exit status: 3"));
}

#[test]
fn test_nickel_output_is_compiled() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("echo.ncl"), "# evaluated by the fake nickel").unwrap();
    let ir_path: PathBuf = temp.path().join("echo_ir.json");
    fs::write(&ir_path, format!("[{ECHO_IR}, {{\"helpers\": {{}}}}]")).unwrap();
    let path = fake_tool(&temp.path().join("bin"), "nickel", &format!("cat {}", ir_path.display()));

    protoweavec(temp.path())
        .env("PATH", path)
        .args(["--proto_out=gen", "echo.ncl"])
        .assert()
        .success();
    assert!(temp.path().join("gen/demo/echo.proto").is_file());
}

#[test]
fn test_nickel_stderr_is_surfaced() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.ncl"), "").unwrap();
    let path = fake_tool(
        &temp.path().join("bin"),
        "nickel",
        "echo 'error: unbound identifier `foo`' >&2\nexit 1",
    );

    protoweavec(temp.path())
        .env("PATH", path)
        .args(["--proto_out=gen", "broken.ncl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unbound identifier `foo`"));
}

#[test]
fn test_jsonnet_is_evaluated_without_an_interpreter() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("vendor")).unwrap();
    fs::write(temp.path().join("vendor/common.libsonnet"), "{ package: 'demo' }").unwrap();
    fs::write(
        temp.path().join("echo.jsonnet"),
        r#"local pw = import 'protoweave.libsonnet';
local common = import 'common.libsonnet';

pw.File('demo/echo.proto', common.package, {
  EchoRequest: pw.Message({
    message: pw.Field('string', 1),
  }, help='Request to send an echo back.'),
})
"#,
    )
    .unwrap();
    let empty_bin = temp.path().join("bin");
    fs::create_dir_all(&empty_bin).unwrap();

    protoweavec(temp.path())
        .env("PATH", &empty_bin)
        .args(["--proto_out=gen", "-J", "vendor", "echo.jsonnet"])
        .assert()
        .success();

    let generated = fs::read_to_string(temp.path().join("gen/demo/echo.proto")).unwrap();
    assert!(generated.contains("package demo;\n"));
    assert!(generated.contains(
        "// Request to send an echo back.\nmessage EchoRequest {\n    string message = 1;\n}\n"
    ));
}

#[test]
fn test_jsonnet_errors_fail_the_run() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.jsonnet"), "import 'nowhere.libsonnet'").unwrap();

    protoweavec(temp.path())
        .args(["--proto_out=gen", "bad.jsonnet"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("jsonnet:").and(predicate::str::contains("nowhere.libsonnet")),
        );
    assert!(!temp.path().join("gen").exists());
}
