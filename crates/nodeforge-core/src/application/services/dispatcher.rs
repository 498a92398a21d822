//! Protocol dispatch for one node.
//!
//! Two phases, always in this order:
//!
//! 1. **Validating**: every configured protocol is checked (REST, gRPC, WS)
//!    against the backend's capability set. The first failure stops here,
//!    before any write.
//! 2. **Rendering | Skipped**: a valid REST server on the `openApi` template is
//!    handed to the renderer. Anything else renders no source.

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{OpenApiRenderer, RenderRequest},
    },
    domain::{
        DomainError, DomainValidator, GenerationContext, GenerationStage, Language, Protocol,
        ServerTemplate, SkipReason, SourceOutcome,
    },
    error::ForgeResult,
};

/// What the rendering phase will do for a validated node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchPlan {
    RenderOpenApi(RenderRequest),
    Skip(SkipReason),
}

pub struct ProtocolDispatcher<'a> {
    language: Language,
    supported: &'static [Protocol],
    renderer: &'a dyn OpenApiRenderer,
}

impl<'a> ProtocolDispatcher<'a> {
    pub fn new(
        language: Language,
        supported: &'static [Protocol],
        renderer: &'a dyn OpenApiRenderer,
    ) -> Self {
        Self {
            language,
            supported,
            renderer,
        }
    }

    /// Run the validation phase and decide the rendering phase. No I/O.
    pub fn plan(&self, context: &GenerationContext) -> Result<DispatchPlan, DomainError> {
        let node = context.node();
        DomainValidator::validate_node(node, self.language, self.supported)?;

        if let Some(server) = node.rest_server() {
            return Ok(match server.template {
                ServerTemplate::OpenApi => DispatchPlan::RenderOpenApi(RenderRequest {
                    language: self.language,
                    spec_content: server.open_api_spec_content.clone(),
                    output_dir: context.node_directory().to_path_buf(),
                    owner_name: context.owner_name().to_string(),
                    node_name: context.node_name().to_string(),
                    port: server.port,
                }),
                ServerTemplate::Compage => DispatchPlan::Skip(SkipReason::TemplateNotRendered),
            });
        }

        let reason = if node.rest_config.is_some() {
            SkipReason::ClientOnly
        } else if node.configured_protocols().is_empty() {
            SkipReason::NoProtocol
        } else {
            SkipReason::NoRenderingPath
        };
        Ok(DispatchPlan::Skip(reason))
    }

    /// Validate, then render the node's source skeleton if it has one.
    #[instrument(skip_all, fields(node = %context.node_name(), language = %self.language))]
    pub fn dispatch(&self, context: &GenerationContext) -> ForgeResult<SourceOutcome> {
        debug!(stage = %GenerationStage::Validating, "Checking protocols");
        let plan = self.plan(context)?;

        match plan {
            DispatchPlan::RenderOpenApi(request) => {
                debug!(stage = %GenerationStage::Rendering, port = request.port, "Rendering OpenAPI skeleton");
                let files = self.renderer.render(&request).map_err(|source| {
                    ApplicationError::TemplateRenderingFailed {
                        node: context.node_name().to_string(),
                        source,
                    }
                })?;
                Ok(SourceOutcome::Rendered {
                    protocol: Protocol::Rest,
                    files,
                })
            }
            DispatchPlan::Skip(reason) => {
                debug!(stage = %GenerationStage::Skipped, ?reason, "No source to render");
                Ok(SourceOutcome::Skipped { reason })
            }
        }
    }
}
