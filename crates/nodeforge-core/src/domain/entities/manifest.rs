use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{context::GenerationContext, render::RenderContext},
    value_objects::Language,
};

/// Inputs of the Kubernetes manifest step, built per node by a backend's
/// integrations factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSpec {
    pub owner_name: String,
    pub repository_name: String,
    pub node_name: String,
    pub node_directory: PathBuf,
    /// Root of the backend's template set; manifests live under `kubernetes/`.
    pub template_root: PathBuf,
    pub is_server: bool,
    pub port: Option<u16>,
    pub language: Language,
}

impl ManifestSpec {
    pub fn from_context(
        context: &GenerationContext,
        language: Language,
        template_root: impl Into<PathBuf>,
    ) -> Self {
        let node = context.node();
        Self {
            owner_name: context.owner_name().to_string(),
            repository_name: context.repository_name().to_string(),
            node_name: context.node_name().to_string(),
            node_directory: context.node_directory().to_path_buf(),
            template_root: template_root.into(),
            is_server: node.is_server(),
            port: node.server_port(),
            language,
        }
    }

    pub fn kubernetes_template_dir(&self) -> PathBuf {
        self.template_root.join("kubernetes")
    }

    pub fn kubernetes_output_dir(&self) -> PathBuf {
        self.node_directory.join("kubernetes")
    }

    pub fn node_directory(&self) -> &Path {
        &self.node_directory
    }

    /// Container image reference for the node.
    pub fn image(&self) -> String {
        format!(
            "ghcr.io/{}/{}/{}:latest",
            self.owner_name,
            self.repository_name,
            super::render::to_kebab_case(&self.node_name)
        )
        .to_lowercase()
    }

    /// Variables available to manifest templates.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new()
            .with_variable("OWNER_NAME", &self.owner_name)
            .with_variable("REPOSITORY_NAME", &self.repository_name)
            .with_name_variants("NODE_NAME", &self.node_name)
            .with_variable("IS_SERVER", self.is_server.to_string())
            .with_variable(
                "SERVER_PORT",
                self.port.map(|p| p.to_string()).unwrap_or_default(),
            )
            .with_variable("IMAGE", self.image())
            .with_variable("LANGUAGE", self.language.as_str())
    }
}
