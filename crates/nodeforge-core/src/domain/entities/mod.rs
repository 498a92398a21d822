pub mod context;
pub mod manifest;
pub mod node;
pub mod project;
pub mod project_structure;
pub mod render;
pub mod report;

pub use crate::domain::DomainError;
pub use context::GenerationContext;
pub use manifest::ManifestSpec;
pub use node::{GrpcConfig, Node, RestConfig, RestServerConfig, WsConfig};
pub use project::Project;
pub use project_structure::ProjectStructure;
pub use render::RenderContext;
pub use report::{GenerationStage, NodeReport, SkipReason, SourceOutcome};
