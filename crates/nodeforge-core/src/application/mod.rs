//! Application layer for nodeforge.
//!
//! This layer contains:
//! - **Services**: dispatcher, backends, registry and project orchestrator
//! - **Integrations**: the Kubernetes manifest step shared by all backends
//! - **Ports**: traits for the filesystem, renderer and template source
//! - **Errors**: orchestration and collaborator error types
//!
//! Business rules (validation, capabilities, rendering of placeholders) live
//! in `crate::domain`.

pub mod error;
pub mod integrations;
pub mod ports;
pub mod services;

pub use services::{
    BackendRegistry, CancellationToken, JavaBackend, LanguageBackend, NodeFailure, Orchestrator,
    OrchestratorOptions, ProjectReport, ProtocolDispatcher, Toolchain, TypeScriptBackend,
};

pub use integrations::{Integrations, KubernetesCopier};

pub use ports::{Filesystem, OpenApiRenderer, RenderRequest, TemplateFile, TemplateSource};

pub use error::{ApplicationError, ManifestError, RenderError};
