//! nodeforge core - generation orchestration for service nodes.
//!
//! Given a [`Node`](domain::Node) (name, language, exposed protocols) a
//! language backend validates the protocol configuration, renders a source
//! skeleton for a REST/OpenAPI server and then always writes the node's
//! Kubernetes manifests.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            nodeforge-cli                │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Orchestrator → BackendRegistry        │
//! │   → LanguageBackend (Java, TypeScript)  │
//! │   → ProtocolDispatcher + Kubernetes     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Ports: Filesystem, OpenApiRenderer,   │
//! │          TemplateSource                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          nodeforge-adapters             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::{path::Path, sync::Arc};
//! use nodeforge_core::prelude::*;
//!
//! # fn run(toolchain: Toolchain, project: Project) -> ForgeResult<()> {
//! let registry = Arc::new(BackendRegistry::with_builtin(toolchain)?);
//! let orchestrator = Orchestrator::new(registry, OrchestratorOptions::default());
//!
//! let report = orchestrator.generate_project(&project, Path::new("./out"))?;
//! report.ensure_success()?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        BackendRegistry, CancellationToken, LanguageBackend, Orchestrator, OrchestratorOptions,
        ProjectReport, Toolchain,
        ports::{Filesystem, OpenApiRenderer, RenderRequest, TemplateFile, TemplateSource},
    };
    pub use crate::domain::{
        GenerationContext, Language, Node, NodeReport, Project, Protocol, RestConfig,
        RestServerConfig, ServerTemplate, SourceOutcome,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
