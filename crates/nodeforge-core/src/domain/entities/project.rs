use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{context::GenerationContext, node::Node},
    error::DomainError,
};

/// A project: the owner/repository identity shared by a set of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Account that owns the generated repository.
    #[serde(alias = "userName", alias = "ownerName")]
    pub owner: String,

    #[serde(alias = "repositoryName")]
    pub repository: String,

    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Project {
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            nodes: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Reject projects whose node directories would overlap.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.name.as_str()) {
                return Err(DomainError::DuplicateNode {
                    node: node.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Directory a node is generated into.
    pub fn node_directory(output_root: &Path, node: &Node) -> PathBuf {
        output_root.join(&node.name)
    }

    /// Build the per-node generation context.
    pub fn context_for(&self, node: &Node, output_root: &Path) -> GenerationContext {
        GenerationContext::new(
            &self.owner,
            &self.repository,
            Self::node_directory(output_root, node),
            node.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_node_names_are_rejected() {
        let project = Project::new("acme", "shop")
            .with_node(Node::new("api", "java"))
            .with_node(Node::new("api", "typescript"));

        assert_eq!(
            project.validate(),
            Err(DomainError::DuplicateNode { node: "api".into() })
        );
    }

    #[test]
    fn context_places_node_under_output_root() {
        let project = Project::new("acme", "shop").with_node(Node::new("api", "java"));
        let ctx = project.context_for(&project.nodes[0], Path::new("/out"));

        assert_eq!(ctx.node_directory(), Path::new("/out/api"));
        assert_eq!(ctx.owner_name(), "acme");
        assert_eq!(ctx.repository_name(), "shop");
        assert_eq!(ctx.node_name(), "api");
    }

    #[test]
    fn accepts_legacy_identity_keys() {
        let project: Project = serde_json::from_str(
            r#"{ "userName": "acme", "repositoryName": "shop", "nodes": [] }"#,
        )
        .unwrap();
        assert_eq!(project.owner, "acme");
        assert_eq!(project.repository, "shop");
    }
}
