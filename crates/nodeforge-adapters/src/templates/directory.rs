use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use nodeforge_core::application::{ManifestError, TemplateFile, ports::TemplateSource};

/// Templates read from a directory tree on disk.
///
/// `load_dir("java/kubernetes")` reads `<base>/java/kubernetes/*`, one level
/// deep.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    base: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl TemplateSource for DirectoryTemplates {
    #[instrument(skip(self), fields(base = %self.base.display()))]
    fn load_dir(&self, dir: &Path) -> Result<Vec<TemplateFile>, ManifestError> {
        let root = self.base.join(dir);
        if !root.is_dir() {
            debug!(path = %root.display(), "template directory missing");
            return Ok(Vec::new());
        }

        let read_error = |reason: String| ManifestError::Read {
            root: root.clone(),
            reason,
        };

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| read_error(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let content = std::fs::read_to_string(entry.path())
                .map_err(|e| read_error(format!("{name}: {e}")))?;
            files.push(TemplateFile { name, content });
        }

        debug!(count = files.len(), "loaded templates");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sorted_files_one_level_deep() {
        let dir = tempfile::tempdir().unwrap();
        let k8s = dir.path().join("java/kubernetes");
        std::fs::create_dir_all(k8s.join("nested")).unwrap();
        std::fs::write(k8s.join("service.yaml.tmpl"), "s").unwrap();
        std::fs::write(k8s.join("deployment.yaml.tmpl"), "d").unwrap();
        std::fs::write(k8s.join("nested/ignored.tmpl"), "x").unwrap();

        let files = DirectoryTemplates::new(dir.path())
            .load_dir(Path::new("java/kubernetes"))
            .unwrap();

        assert_eq!(
            files,
            vec![
                TemplateFile {
                    name: "deployment.yaml.tmpl".into(),
                    content: "d".into()
                },
                TemplateFile {
                    name: "service.yaml.tmpl".into(),
                    content: "s".into()
                },
            ]
        );
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = DirectoryTemplates::new(dir.path())
            .load_dir(Path::new("typescript/kubernetes"))
            .unwrap();
        assert!(files.is_empty());
    }
}
