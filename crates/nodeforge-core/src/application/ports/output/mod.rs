//! Driven (output) ports - implemented by infrastructure.

use std::path::{Path, PathBuf};

use crate::application::error::{ManifestError, RenderError};
use crate::domain::Language;
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `nodeforge_adapters::filesystem::LocalFilesystem` (production)
/// - `nodeforge_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
///
/// Writes overwrite existing files; generating twice yields the same tree.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Everything a renderer needs to emit one node's source skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub language: Language,
    pub spec_content: String,
    pub output_dir: PathBuf,
    pub owner_name: String,
    pub node_name: String,
    pub port: u16,
}

/// Port for the OpenAPI rendering collaborator.
///
/// Implemented by:
/// - `nodeforge_adapters::renderer::SkeletonRenderer` (built in)
/// - `nodeforge_adapters::renderer::OpenApiGeneratorCli` (external tool)
#[cfg_attr(test, mockall::automock)]
pub trait OpenApiRenderer: Send + Sync {
    /// Render into `request.output_dir`, returning the paths written.
    fn render(&self, request: &RenderRequest) -> Result<Vec<PathBuf>, RenderError>;
}

/// One manifest template: file name and raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// File name relative to the directory it was loaded from.
    pub name: String,
    pub content: String,
}

/// Port for manifest template lookup.
///
/// Implemented by:
/// - `nodeforge_adapters::templates::EmbeddedTemplates` (compiled in)
/// - `nodeforge_adapters::templates::DirectoryTemplates` (on disk)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Template files directly under `dir`, sorted by name.
    ///
    /// An unknown directory yields an empty list.
    fn load_dir(&self, dir: &Path) -> Result<Vec<TemplateFile>, ManifestError>;
}
