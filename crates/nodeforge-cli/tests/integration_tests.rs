//! Integration tests for the nodeforge binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PROJECT: &str = r#"
owner: acme
repository: shop
nodes:
  - name: users
    language: java
    restConfig:
      server:
        template: openApi
        port: 8080
        openApiFileYamlContent: |
          openapi: 3.0.0
          info:
            title: Users
            version: 1.0.0
          paths:
            /users:
              get:
                operationId: listUsers
  - name: worker
    language: java
"#;

/// A command isolated from the user's config, logging and template setup.
fn nodeforge(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nodeforge");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("NODEFORGE_TEMPLATES_DIR");
    cmd
}

fn workspace(project: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("project.yaml"), project).unwrap();
    temp
}

#[test]
fn help_flag() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nodeforge"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_writes_source_and_manifests() {
    let temp = workspace(PROJECT);

    nodeforge(temp.path())
        .args(["generate", "project.yaml", "-o", "out", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 2 node(s) generated"));

    let out = temp.path().join("out");
    assert!(out.join("users/pom.xml").is_file());
    assert!(out.join("users/openapi.yaml").is_file());
    let service = fs::read_to_string(out.join("users/kubernetes/service.yaml")).unwrap();
    assert!(service.contains("port: 8080"));

    let deployment = fs::read_to_string(out.join("worker/kubernetes/deployment.yaml")).unwrap();
    assert!(deployment.contains("image: ghcr.io/acme/shop/worker:latest"));
    assert!(!out.join("worker/kubernetes/service.yaml").exists());
    assert!(!out.join("worker/pom.xml").exists());
}

#[test]
fn generate_twice_is_idempotent() {
    let temp = workspace(PROJECT);
    let run = || {
        nodeforge(temp.path())
            .args(["generate", "project.yaml", "-o", "out", "-y", "--jobs", "1"])
            .assert()
            .success();
        fs::read_to_string(temp.path().join("out/users/kubernetes/deployment.yaml")).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn dry_run_writes_nothing() {
    let temp = workspace(PROJECT);

    nodeforge(temp.path())
        .args(["generate", "project.yaml", "-o", "out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("deployment.yaml"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn dry_run_json_report() {
    let temp = workspace(PROJECT);

    let assert = nodeforge(temp.path())
        .args([
            "--output-format",
            "json",
            "generate",
            "project.yaml",
            "--dry-run",
        ])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["failed"].as_array().unwrap().len(), 0);

    let succeeded = report["succeeded"].as_array().unwrap();
    assert_eq!(succeeded.len(), 2);
    assert_eq!(succeeded[0]["node"], "users");
    assert_eq!(succeeded[0]["source"]["status"], "rendered");
    assert_eq!(succeeded[1]["source"]["status"], "skipped");
    assert_eq!(succeeded[1]["source"]["reason"], "no_protocol");
}

#[test]
fn owner_can_come_from_the_command_line() {
    let temp = workspace("repository: shop\nnodes:\n  - name: job\n    language: ts\n");

    nodeforge(temp.path())
        .args(["generate", "project.yaml", "-o", "out", "-y", "--owner", "Globex"])
        .assert()
        .success();

    let deployment =
        fs::read_to_string(temp.path().join("out/job/kubernetes/deployment.yaml")).unwrap();
    assert!(deployment.contains("ghcr.io/globex/shop/job:latest"));
}

#[test]
fn local_templates_flag_overrides_embedded() {
    let temp = workspace("owner: acme\nrepository: shop\nnodes:\n  - name: job\n    language: java\n");
    let templates = temp.path().join("custom/java/kubernetes");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("deployment.yaml.tmpl"), "name: {{NODE_NAME}}\n").unwrap();

    nodeforge(temp.path())
        .args([
            "generate",
            "project.yaml",
            "-o",
            "out",
            "-y",
            "--templates",
            "custom",
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/job/kubernetes/deployment.yaml")).unwrap(),
        "name: job\n"
    );
}

#[test]
fn validate_accepts_valid_project() {
    let temp = workspace(PROJECT);

    nodeforge(temp.path())
        .args(["validate", "project.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 node(s) valid"));

    assert!(!temp.path().join("users").exists());
}

#[test]
fn languages_json() {
    let temp = TempDir::new().unwrap();

    let assert = nodeforge(temp.path())
        .args(["languages", "--format", "json"])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["language"], "java");
    assert_eq!(rows[0]["protocols"], serde_json::json!(["rest"]));
    assert_eq!(rows[1]["openapi_generator"], "nodejs-express-server");
}

#[test]
fn languages_all_lists_languages_without_backend() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .args(["ls", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no backend)"));
}

#[test]
fn init_local_then_refuse_overwrite() {
    let temp = TempDir::new().unwrap();

    nodeforge(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));

    let written = fs::read_to_string(temp.path().join(".nodeforge.toml")).unwrap();
    assert!(written.contains("[generation]"));
    assert!(written.contains("renderer = \"builtin\""));

    nodeforge(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn local_config_file_is_read() {
    let temp = workspace(PROJECT);
    fs::write(
        temp.path().join(".nodeforge.toml"),
        "[defaults]\nowner = \"initech\"\n",
    )
    .unwrap();

    nodeforge(temp.path())
        .args(["config", "get", "defaults.owner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults.owner = initech"));
}

#[test]
fn environment_overrides_config() {
    let temp = TempDir::new().unwrap();

    nodeforge(temp.path())
        .env("NODEFORGE__GENERATION__RENDERER", "openapi-generator")
        .args(["config", "get", "generation.renderer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generation.renderer = openapi-generator"));
}

#[test]
fn completions_bash() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nodeforge"));
}

#[test]
fn log_file_receives_json_records() {
    let temp = workspace(PROJECT);

    nodeforge(temp.path())
        .args([
            "-v",
            "--log-file",
            "logs/run.log",
            "generate",
            "project.yaml",
            "--dry-run",
        ])
        .assert()
        .success();

    let log = fs::read_to_string(temp.path().join("logs/run.log")).unwrap();
    let first = log.lines().next().unwrap();
    let record: serde_json::Value = serde_json::from_str(first).unwrap();
    assert!(record.get("level").is_some());
}
