//! Materializes a [`ProjectStructure`] through the filesystem port.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::{
    application::{
        error::{ManifestError, RenderError},
        ports::Filesystem,
    },
    domain::{FsEntry, ProjectStructure},
};

/// A write that did not happen.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("failed to write {path}: {reason}")]
pub struct WriteFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl From<WriteFailure> for RenderError {
    fn from(e: WriteFailure) -> Self {
        RenderError::Write {
            path: e.path,
            reason: e.reason,
        }
    }
}

impl From<WriteFailure> for ManifestError {
    fn from(e: WriteFailure) -> Self {
        ManifestError::Write {
            path: e.path,
            reason: e.reason,
        }
    }
}

/// Write every entry of `structure`, returning the file paths written in
/// entry order.
///
/// Existing files are overwritten. Nothing is rolled back on failure.
pub fn write_structure(
    filesystem: &dyn Filesystem,
    structure: &ProjectStructure,
) -> Result<Vec<PathBuf>, WriteFailure> {
    structure.validate().map_err(|e| WriteFailure {
        path: structure.root().to_path_buf(),
        reason: e.to_string(),
    })?;

    let fail = |path: &PathBuf, e: crate::error::ForgeError| WriteFailure {
        path: path.clone(),
        reason: e.to_string(),
    };

    let root = structure.root().to_path_buf();
    filesystem.create_dir_all(&root).map_err(|e| fail(&root, e))?;

    let mut written = Vec::with_capacity(structure.files().count());
    for entry in structure.entries() {
        let path = root.join(entry.path());
        match entry {
            FsEntry::Directory(_) => {
                filesystem.create_dir_all(&path).map_err(|e| fail(&path, e))?;
            }
            FsEntry::File(file) => {
                if let Some(parent) = path.parent() {
                    filesystem
                        .create_dir_all(parent)
                        .map_err(|e| fail(&path, e))?;
                }
                filesystem
                    .write_file(&path, &file.content)
                    .map_err(|e| fail(&path, e))?;
                debug!(path = %path.display(), bytes = file.content.len(), "Wrote file");
                written.push(path);
            }
        }
    }

    Ok(written)
}
