//! Application services - orchestrate use cases.
//!
//! `ProtocolDispatcher` and `LanguageBackend` handle one node,
//! `BackendRegistry` picks the backend, `Orchestrator` runs whole projects.

pub mod backend;
pub mod backends;
pub mod dispatcher;
pub mod orchestrator;
pub mod registry;
pub mod writer;

pub use backend::{LanguageBackend, Toolchain};
pub use backends::{JavaBackend, TypeScriptBackend};
pub use dispatcher::{DispatchPlan, ProtocolDispatcher};
pub use orchestrator::{
    CancellationToken, NodeFailure, Orchestrator, OrchestratorOptions, ProjectReport,
};
pub use registry::BackendRegistry;
pub use writer::{WriteFailure, write_structure};
