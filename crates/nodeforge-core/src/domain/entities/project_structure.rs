use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A set of files and directories ready to be written under one root.
///
/// Renderers and the manifest step build one of these, then hand it to the
/// filesystem port. It contains no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.entries.push(FsEntry::File(FileToWrite {
            path: path.into(),
            content: content.into(),
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(FsEntry::Directory(DirectoryToCreate { path: path.into() }));
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_directory(path);
        self
    }

    /// Entry paths must be relative, stay under the root and be unique.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();
            let path_str = path.display().to_string();

            if path.is_absolute() {
                return Err(DomainError::InvalidOutputPath {
                    path: path_str,
                    reason: "absolute paths are not allowed".into(),
                });
            }

            if path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
            {
                return Err(DomainError::InvalidOutputPath {
                    path: path_str,
                    reason: "path escapes the output root".into(),
                });
            }

            if !seen.insert(path_str.clone()) {
                return Err(DomainError::InvalidOutputPath {
                    path: path_str,
                    reason: "written twice".into(),
                });
            }
        }

        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &Path {
        match self {
            FsEntry::File(f) => &f.path,
            FsEntry::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryToCreate {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_files_and_directories() {
        let structure = ProjectStructure::new("/out/api")
            .with_directory("src")
            .with_file("src/main.ts", "export {}");

        assert_eq!(structure.entry_count(), 2);
        assert_eq!(structure.files().count(), 1);
        assert_eq!(structure.directories().count(), 1);
        assert!(structure.validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_paths() {
        let structure = ProjectStructure::new("/out")
            .with_file("a.yaml", "")
            .with_file("a.yaml", "");

        assert!(matches!(
            structure.validate(),
            Err(DomainError::InvalidOutputPath { .. })
        ));
    }

    #[test]
    fn rejects_paths_escaping_root() {
        let up = ProjectStructure::new("/out").with_file("../evil", "");
        assert!(up.validate().is_err());

        let absolute = ProjectStructure::new("/out").with_file("/etc/passwd", "");
        assert!(absolute.validate().is_err());
    }

    #[test]
    fn empty_structure_is_valid() {
        assert!(ProjectStructure::new("/out").validate().is_ok());
    }
}
