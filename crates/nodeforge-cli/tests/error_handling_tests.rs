//! Tests for error handling, suggestions and exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nodeforge(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nodeforge");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("NODEFORGE_TEMPLATES_DIR");
    cmd
}

fn workspace(file: &str, project: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(file), project).unwrap();
    temp
}

#[test]
fn unsupported_grpc_writes_nothing() {
    let temp = workspace(
        "project.json",
        r#"{"owner":"acme","repository":"shop","nodes":[
            {"name":"events","language":"typescript","grpcConfig":{}}
        ]}"#,
    );

    nodeforge(temp.path())
        .args(["generate", "project.json", "-o", "out", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("1 of 1 node(s) failed: events"))
        .stderr(predicate::str::contains(
            "unsupported protocol grpc for language typescript",
        ));

    assert!(!temp.path().join("out/events").exists());
}

#[test]
fn unknown_language_is_not_found() {
    let temp = workspace(
        "project.yaml",
        "owner: acme\nrepository: shop\nnodes:\n  - name: legacy\n    language: cobol\n",
    );

    nodeforge(temp.path())
        .args(["generate", "project.yaml", "-o", "out", "-y"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cobol"))
        .stderr(predicate::str::contains("nodeforge languages"));
}

#[test]
fn failed_node_does_not_stop_the_others() {
    let temp = workspace(
        "project.yaml",
        r#"
owner: acme
repository: shop
nodes:
  - name: legacy
    language: cobol
  - name: worker
    language: java
"#,
    );

    nodeforge(temp.path())
        .args(["generate", "project.yaml", "-o", "out", "-y", "--jobs", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 node(s) failed: legacy"));

    assert!(temp.path().join("out/worker/kubernetes/deployment.yaml").is_file());
}

#[test]
fn empty_spec_fails_validation() {
    let temp = workspace(
        "project.yaml",
        r#"
owner: acme
repository: shop
nodes:
  - name: users
    language: java
    restConfig:
      server:
        template: openApi
        port: 8080
"#,
    );

    nodeforge(temp.path())
        .args(["validate", "project.yaml"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("users:"));
}

#[test]
fn duplicate_node_names_are_rejected() {
    let temp = workspace(
        "project.yaml",
        r#"
owner: acme
repository: shop
nodes:
  - name: api
    language: java
  - name: api
    language: typescript
"#,
    );

    nodeforge(temp.path())
        .args(["generate", "project.yaml", "-o", "out", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("api"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn missing_project_file() {
    let temp = TempDir::new().unwrap();

    nodeforge(temp.path())
        .args(["generate", "absent.yaml", "-y"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Project file not found"));
}

#[test]
fn malformed_project_file() {
    let temp = workspace("project.yaml", "owner: acme\nrepository: shop\n");

    nodeforge(temp.path())
        .args(["validate", "project.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project file"))
        .stderr(predicate::str::contains("nodes"));
}

#[test]
fn invalid_config_value_is_configuration_error() {
    let temp = workspace("bad.toml", "[generation]\njobs = \"many\"\n");

    nodeforge(temp.path())
        .args(["--config", "bad.toml", "languages"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_config_key() {
    let temp = TempDir::new().unwrap();

    nodeforge(temp.path())
        .args(["config", "get", "generation.colour"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn verbose_hint_only_without_verbose() {
    let temp = TempDir::new().unwrap();

    nodeforge(temp.path())
        .args(["validate", "absent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--verbose"));
}

#[test]
fn bad_arguments_exit_with_usage_error() {
    let temp = TempDir::new().unwrap();

    nodeforge(temp.path())
        .args(["generate", "p.yaml", "--jobs", "0"])
        .assert()
        .code(2);
}

#[test]
fn dry_run_refuses_the_external_generator() {
    let temp = workspace(
        "project.yaml",
        "owner: acme\nrepository: shop\nnodes:\n  - name: worker\n    language: java\n",
    );

    nodeforge(temp.path())
        .env("NODEFORGE__GENERATION__OPENAPI_GENERATOR_BIN", "/nonexistent/openapi-generator")
        .args([
            "generate",
            "project.yaml",
            "-o",
            "out",
            "--dry-run",
            "--renderer",
            "openapi-generator",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "--dry-run is not supported with the openapi-generator renderer",
        ))
        .stderr(predicate::str::contains("--renderer builtin"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn dry_run_refuses_the_configured_external_generator() {
    let temp = workspace(
        "project.yaml",
        "owner: acme\nrepository: shop\nnodes:\n  - name: worker\n    language: java\n",
    );

    nodeforge(temp.path())
        .env("NODEFORGE__GENERATION__RENDERER", "openapi-generator")
        .args(["generate", "project.yaml", "-o", "out", "--dry-run"])
        .assert()
        .code(2);

    assert!(!temp.path().join("out").exists());
}
