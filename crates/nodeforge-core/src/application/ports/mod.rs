//! Application ports (traits) for external dependencies.
//!
//! Adapters in `nodeforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the generation core
//!   - `Filesystem`: writes into node directories
//!   - `OpenApiRenderer`: turns an OpenAPI document into a source skeleton
//!   - `TemplateSource`: supplies Kubernetes manifest templates
//!
//! - **Driving (Input) Ports**: `BackendRegistry` and `Orchestrator`, called
//!   by the CLI.

pub mod output;

pub use output::{Filesystem, OpenApiRenderer, RenderRequest, TemplateFile, TemplateSource};

#[cfg(test)]
pub use output::{MockFilesystem, MockOpenApiRenderer, MockTemplateSource};
