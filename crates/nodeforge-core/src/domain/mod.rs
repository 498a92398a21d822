//! Core domain layer for nodeforge.
//!
//! Pure data and rules: the node model, backend capabilities, rendering of
//! placeholder templates and validation. All I/O (filesystem, template
//! sources, external generators) is reached through ports defined in the
//! application layer.
//!
//! ## Rules
//!
//! - **No I/O**: no filesystem, network or process calls
//! - **Synchronous**: everything here is plain function calls
//! - **Immutable inputs**: `Node` and `Project` are never mutated by generation

pub mod capabilities;
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use capabilities::{BACKEND_REGISTRY, BackendDef, backend_supports, find_backend};

pub use entities::{
    GenerationContext, GenerationStage, GrpcConfig, ManifestSpec, Node, NodeReport, Project,
    ProjectStructure, RenderContext, RestConfig, RestServerConfig, SkipReason, SourceOutcome,
    WsConfig,
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Language, Protocol, ServerTemplate};

pub use validation::DomainValidator;
