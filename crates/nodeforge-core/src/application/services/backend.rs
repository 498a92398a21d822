//! The contract every language backend satisfies.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        integrations::{Integrations, KubernetesCopier},
        ports::{Filesystem, OpenApiRenderer, TemplateSource},
        services::dispatcher::ProtocolDispatcher,
    },
    domain::{
        BackendDef, DomainError, DomainValidator, GenerationContext, GenerationStage, Language,
        ManifestSpec, Node, NodeReport, Protocol,
    },
    error::ForgeResult,
};

/// Shared collaborator handles a backend is built with.
#[derive(Clone)]
pub struct Toolchain {
    pub renderer: Arc<dyn OpenApiRenderer>,
    pub templates: Arc<dyn TemplateSource>,
    pub filesystem: Arc<dyn Filesystem>,
}

impl Toolchain {
    pub fn new(
        renderer: Arc<dyn OpenApiRenderer>,
        templates: Arc<dyn TemplateSource>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            renderer,
            templates,
            filesystem,
        }
    }
}

/// A per-language generator.
///
/// Implementors supply their capability definition and toolchain; the
/// provided methods run the shared pipeline: dispatch (validate, then render)
/// followed by the Kubernetes manifest step. The manifest step runs for every
/// node that passed dispatch, whichever protocols it configures.
pub trait LanguageBackend: Send + Sync {
    fn definition(&self) -> &'static BackendDef;

    fn toolchain(&self) -> &Toolchain;

    fn language(&self) -> Language {
        self.definition().language
    }

    fn protocols(&self) -> &'static [Protocol] {
        self.definition().protocols
    }

    fn template_root(&self) -> &'static str {
        self.definition().template_root
    }

    fn supports(&self, protocol: Protocol) -> bool {
        self.protocols().contains(&protocol)
    }

    /// Integration capabilities for one node.
    fn integrations<'a>(&'a self, context: &GenerationContext) -> Integrations<'a> {
        let toolchain = self.toolchain();
        let spec = ManifestSpec::from_context(context, self.language(), self.template_root());
        Integrations {
            kubernetes: KubernetesCopier::new(
                spec,
                toolchain.templates.as_ref(),
                toolchain.filesystem.as_ref(),
            ),
        }
    }

    /// Validation phase only. Nothing is written.
    fn validate(&self, node: &Node) -> Result<(), DomainError> {
        DomainValidator::validate_node(node, self.language(), self.protocols())
    }

    #[instrument(skip_all, fields(node = %context.node_name(), language = %self.language()))]
    fn generate(&self, context: &GenerationContext) -> ForgeResult<NodeReport> {
        let dispatcher = ProtocolDispatcher::new(
            self.language(),
            self.protocols(),
            self.toolchain().renderer.as_ref(),
        );
        let stages = || -> ForgeResult<_> {
            let source = dispatcher.dispatch(context)?;

            debug!(stage = %GenerationStage::EmittingManifests, "Writing Kubernetes manifests");
            let manifests = self
                .integrations(context)
                .kubernetes
                .create_kubernetes_files()
                .map_err(|source| ApplicationError::ManifestFailed {
                    node: context.node_name().to_string(),
                    source,
                })?;
            Ok((source, manifests))
        };
        let (source, manifests) = stages().inspect_err(|e| {
            warn!(stage = %GenerationStage::Failed, error = %e, "Node generation failed");
        })?;

        info!(
            stage = %GenerationStage::Done,
            rendered = source.is_rendered(),
            manifests = manifests.len(),
            "Node generated"
        );

        Ok(NodeReport {
            node: context.node_name().to_string(),
            language: self.language(),
            directory: context.node_directory().to_path_buf(),
            source,
            manifests,
        })
    }
}
