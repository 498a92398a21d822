//! Subcommand handlers.
//!
//! Each handler translates parsed arguments into calls on `nodeforge-core`
//! and renders the result through the [`OutputManager`](crate::output::OutputManager).

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod languages;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use nodeforge_adapters::{OpenApiGeneratorCli, SkeletonRenderer, resolve_templates};
use nodeforge_core::application::{BackendRegistry, Filesystem, OpenApiRenderer, Toolchain};

use crate::{
    config::{AppConfig, RendererKind},
    error::CliResult,
};

/// Wire the adapters into a registry of the built-in backends.
pub(crate) fn build_registry(
    renderer: RendererKind,
    templates: Option<PathBuf>,
    config: &AppConfig,
    filesystem: Arc<dyn Filesystem>,
) -> CliResult<BackendRegistry> {
    let renderer: Arc<dyn OpenApiRenderer> = match renderer {
        RendererKind::Builtin => Arc::new(SkeletonRenderer::new(filesystem.clone())),
        RendererKind::OpenapiGenerator => Arc::new(OpenApiGeneratorCli::new(
            config.generation.openapi_generator_bin.as_str(),
            filesystem.clone(),
        )),
    };
    let toolchain = Toolchain::new(renderer, Arc::new(resolve_templates(templates)), filesystem);
    Ok(BackendRegistry::with_builtin(toolchain)?)
}
