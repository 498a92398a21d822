//! Loading project descriptors from disk.
//!
//! The file format follows the extension: `.yaml`/`.yml` or `.json`. Owner
//! and repository resolve from the command line, then the file, then the
//! configured defaults.

use std::path::Path;

use serde::Deserialize;

use nodeforge_core::domain::{Node, Project};

use crate::{
    config::Defaults,
    error::{CliError, CliResult, IntoCli},
};

/// The on-disk shape: identity fields may be left to the defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Descriptor {
    #[serde(default, alias = "userName", alias = "ownerName")]
    owner: Option<String>,
    #[serde(default, alias = "repositoryName")]
    repository: Option<String>,
    nodes: Vec<Node>,
}

/// Owner/repository given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub owner: Option<String>,
    pub repository: Option<String>,
}

pub fn load_project(path: &Path, identity: &Identity, defaults: &Defaults) -> CliResult<Project> {
    if !path.is_file() {
        return Err(CliError::ProjectFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)
        .with_cli_context(|| format!("failed to read '{}'", path.display()))?;
    let descriptor = parse(path, &content)?;

    let owner = resolve(
        "owner",
        path,
        [&identity.owner, &descriptor.owner, &defaults.owner],
    )?;
    let repository = resolve(
        "repository",
        path,
        [&identity.repository, &descriptor.repository, &defaults.repository],
    )?;

    Ok(Project {
        owner,
        repository,
        nodes: descriptor.nodes,
    })
}

fn parse(path: &Path, content: &str) -> CliResult<Descriptor> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let invalid = |reason: String| CliError::ProjectFile {
        path: path.to_path_buf(),
        reason,
    };

    match extension.as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_str(content).map_err(|e| invalid(e.to_string())),
        Some("json") => serde_json::from_str(content).map_err(|e| invalid(e.to_string())),
        _ => Err(invalid(
            "unsupported extension, expected .yaml, .yml or .json".into(),
        )),
    }
}

fn resolve(field: &str, path: &Path, candidates: [&Option<String>; 3]) -> CliResult<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| CliError::ProjectFile {
            path: path.to_path_buf(),
            reason: format!("`{field}` is not set (use --{field} or defaults.{field})"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    const YAML: &str = r#"
owner: acme
repository: shop
nodes:
  - name: users
    language: java
    restConfig:
      server:
        template: openApi
        port: 8080
        openApiFileYamlContent: "openapi: 3.0.0"
  - name: worker
    language: typescript
"#;

    #[test]
    fn loads_yaml_descriptor() {
        let (_dir, path) = write("project.yaml", YAML);
        let project = load_project(&path, &Identity::default(), &Defaults::default()).unwrap();

        assert_eq!(project.owner, "acme");
        assert_eq!(project.repository, "shop");
        assert_eq!(project.nodes.len(), 2);
        assert_eq!(project.nodes[0].server_port(), Some(8080));
        assert!(!project.nodes[1].is_server());
    }

    #[test]
    fn loads_json_descriptor_with_original_field_names() {
        let (_dir, path) = write(
            "project.json",
            r#"{"userName":"acme","repositoryName":"shop","nodes":[{"name":"a","language":"go"}]}"#,
        );
        let project = load_project(&path, &Identity::default(), &Defaults::default()).unwrap();
        assert_eq!(project.owner, "acme");
        assert_eq!(project.nodes[0].language, "go");
    }

    #[test]
    fn command_line_identity_wins_then_file_then_defaults() {
        let (_dir, path) = write("p.yml", "repository: shop\nnodes: []\n");
        let defaults = Defaults {
            owner: Some("fallback".into()),
            repository: Some("ignored".into()),
        };

        let project = load_project(&path, &Identity::default(), &defaults).unwrap();
        assert_eq!(project.owner, "fallback");
        assert_eq!(project.repository, "shop");

        let identity = Identity {
            owner: Some("cli".into()),
            repository: None,
        };
        let project = load_project(&path, &identity, &defaults).unwrap();
        assert_eq!(project.owner, "cli");
    }

    #[test]
    fn missing_owner_is_reported() {
        let (_dir, path) = write("p.json", r#"{"repository":"shop","nodes":[]}"#);
        let err = load_project(&path, &Identity::default(), &Defaults::default()).unwrap_err();
        assert!(err.to_string().contains("`owner` is not set"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_project(
            &dir.path().join("nope.yaml"),
            &Identity::default(),
            &Defaults::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let (_dir, path) = write("project.toml", "owner = 'acme'");
        assert!(matches!(
            load_project(&path, &Identity::default(), &Defaults::default()),
            Err(CliError::ProjectFile { .. })
        ));
    }
}
