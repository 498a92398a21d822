use std::path::{Path, PathBuf};

use crate::domain::entities::node::Node;

/// Read-only inputs to one node's generation call.
///
/// Built by the orchestrator, passed by reference to the backend, dropped when
/// the call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    owner_name: String,
    repository_name: String,
    node_directory: PathBuf,
    node: Node,
}

impl GenerationContext {
    pub fn new(
        owner_name: impl Into<String>,
        repository_name: impl Into<String>,
        node_directory: impl Into<PathBuf>,
        node: Node,
    ) -> Self {
        Self {
            owner_name: owner_name.into(),
            repository_name: repository_name.into(),
            node_directory: node_directory.into(),
            node,
        }
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn repository_name(&self) -> &str {
        &self.repository_name
    }

    pub fn node_name(&self) -> &str {
        &self.node.name
    }

    pub fn node_directory(&self) -> &Path {
        &self.node_directory
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}
