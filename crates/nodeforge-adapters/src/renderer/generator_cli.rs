//! Delegates rendering to the external `openapi-generator` executable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use nodeforge_core::{
    application::{
        RenderError, RenderRequest,
        ports::{Filesystem, OpenApiRenderer},
    },
    domain::{entities::render::to_kebab_case, find_backend},
};

use super::skeleton::SPEC_FILE_NAME;

pub const DEFAULT_BINARY: &str = "openapi-generator-cli";

/// Writes the OpenAPI document into the node directory, then runs
/// `<binary> generate -i <doc> -g <generator> -o <node dir>` with the
/// generator named in the backend's capability definition.
///
/// The generator writes to the real disk itself. The files it reports are
/// the spec copy plus every file under the node directory that is new or
/// has a changed modification time after the run.
pub struct OpenApiGeneratorCli {
    binary: PathBuf,
    filesystem: Arc<dyn Filesystem>,
}

impl OpenApiGeneratorCli {
    pub fn new(binary: impl Into<PathBuf>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            binary: binary.into(),
            filesystem,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments passed to the generator for `request`.
    pub fn arguments(&self, request: &RenderRequest) -> Result<Vec<String>, RenderError> {
        let def = find_backend(request.language).ok_or_else(|| RenderError::UnsupportedLanguage {
            language: request.language.to_string(),
        })?;

        let spec_path = request.output_dir.join(SPEC_FILE_NAME);
        Ok(vec![
            "generate".into(),
            "-i".into(),
            spec_path.display().to_string(),
            "-g".into(),
            def.openapi_generator.into(),
            "-o".into(),
            request.output_dir.display().to_string(),
            format!(
                "--additional-properties=serverPort={},artifactId={},groupId=com.{}",
                request.port,
                to_kebab_case(&request.node_name),
                to_kebab_case(&request.owner_name).replace('-', "")
            ),
        ])
    }
}

impl OpenApiRenderer for OpenApiGeneratorCli {
    #[instrument(skip_all, fields(node = %request.node_name, binary = %self.binary.display()))]
    fn render(&self, request: &RenderRequest) -> Result<Vec<PathBuf>, RenderError> {
        let args = self.arguments(request)?;
        let command = self.binary.display().to_string();
        let write_error = |path: &Path, e: nodeforge_core::error::ForgeError| RenderError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let spec_path = request.output_dir.join(SPEC_FILE_NAME);
        self.filesystem
            .create_dir_all(&request.output_dir)
            .map_err(|e| write_error(&request.output_dir, e))?;
        self.filesystem
            .write_file(&spec_path, &request.spec_content)
            .map_err(|e| write_error(&spec_path, e))?;

        let before = disk_files(&request.output_dir);

        debug!(?args, "Running openapi-generator");
        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| RenderError::Tool {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Tool {
                command,
                reason: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        let mut written = vec![spec_path.clone()];
        written.extend(
            disk_files(&request.output_dir)
                .into_iter()
                .filter(|(path, modified)| {
                    *path != spec_path && before.get(path) != Some(modified)
                })
                .map(|(path, _)| path),
        );
        written[1..].sort();

        info!(files = written.len(), "openapi-generator finished");
        Ok(written)
    }
}

/// Files under `root` on disk with their modification times. A missing or
/// unreadable tree yields an empty map.
fn disk_files(root: &Path) -> HashMap<PathBuf, Option<SystemTime>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
            (entry.into_path(), modified)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{LocalFilesystem, MemoryFilesystem};
    use nodeforge_core::domain::Language;

    fn request(language: Language) -> RenderRequest {
        RenderRequest {
            language,
            spec_content: "openapi: 3.0.0".into(),
            output_dir: PathBuf::from("/out/users"),
            owner_name: "Acme".into(),
            node_name: "users".into(),
            port: 8080,
        }
    }

    #[test]
    fn generator_comes_from_capabilities() {
        let cli = OpenApiGeneratorCli::new(DEFAULT_BINARY, Arc::new(MemoryFilesystem::new()));

        let java = cli.arguments(&request(Language::Java)).unwrap();
        assert_eq!(java[4], "spring");
        assert_eq!(java[2], "/out/users/openapi.yaml");

        let ts = cli.arguments(&request(Language::TypeScript)).unwrap();
        assert_eq!(ts[4], "nodejs-express-server");
        assert!(ts[7].contains("serverPort=8080"));
    }

    #[test]
    fn missing_binary_is_a_tool_error() {
        let fs = MemoryFilesystem::new();
        let cli = OpenApiGeneratorCli::new(
            "/definitely/not/a/real/openapi-generator",
            Arc::new(fs.clone()),
        );

        let err = cli.render(&request(Language::Java)).unwrap_err();
        assert!(matches!(err, RenderError::Tool { .. }));
        assert!(fs.read_file(Path::new("/out/users/openapi.yaml")).is_some());
    }

    #[cfg(unix)]
    #[test]
    fn reports_files_the_generator_created() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-generator");
        std::fs::write(
            &script,
            "#!/bin/sh\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = \"-o\" ]; then out=\"$2\"; fi\n  shift\ndone\nmkdir -p \"$out/src\"\necho generated > \"$out/src/App.java\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let node_dir = dir.path().join("out/users");
        std::fs::create_dir_all(&node_dir).unwrap();
        std::fs::write(node_dir.join("README.md"), "kept").unwrap();

        let cli = OpenApiGeneratorCli::new(&script, Arc::new(LocalFilesystem::new()));
        let mut req = request(Language::Java);
        req.output_dir = node_dir.clone();

        let written = cli.render(&req).unwrap();

        assert_eq!(
            written,
            vec![node_dir.join("openapi.yaml"), node_dir.join("src/App.java")]
        );
    }

    #[test]
    fn languages_without_generator_are_rejected() {
        let cli = OpenApiGeneratorCli::new(DEFAULT_BINARY, Arc::new(MemoryFilesystem::new()));
        assert!(matches!(
            cli.arguments(&request(Language::Rust)),
            Err(RenderError::UnsupportedLanguage { .. })
        ));
    }
}
