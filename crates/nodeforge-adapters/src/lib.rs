//! Infrastructure adapters for nodeforge.
//!
//! This crate implements the ports defined in `nodeforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod templates;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{OpenApiGeneratorCli, SkeletonRenderer};
pub use templates::{DirectoryTemplates, EmbeddedTemplates, LayeredTemplates, resolve_templates};
