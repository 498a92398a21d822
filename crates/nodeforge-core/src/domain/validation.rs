use crate::domain::{
    entities::{Node, Project},
    error::DomainError,
    value_objects::{Language, Protocol, ServerTemplate},
};

/// Centralized domain validation.
///
/// Checks run in a fixed order (node identity, then REST, gRPC, WS) and stop
/// at the first failure. Nothing here touches the filesystem.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project(project: &Project) -> Result<(), DomainError> {
        project.validate()?;
        for node in &project.nodes {
            Self::validate_node_name(node)?;
        }
        Ok(())
    }

    /// Validate a node against a backend's capability set.
    pub fn validate_node(
        node: &Node,
        language: Language,
        supported: &[Protocol],
    ) -> Result<(), DomainError> {
        Self::validate_node_name(node)?;

        for protocol in node.configured_protocols() {
            if !supported.contains(&protocol) {
                return Err(DomainError::UnsupportedProtocol {
                    protocol: protocol.to_string(),
                    language: language.to_string(),
                });
            }

            if protocol == Protocol::Rest {
                Self::validate_rest(node)?;
            }
        }

        Ok(())
    }

    fn validate_rest(node: &Node) -> Result<(), DomainError> {
        let Some(server) = node.rest_server() else {
            return Ok(());
        };

        if server.port == 0 {
            return Err(DomainError::InvalidNode {
                node: node.name.clone(),
                reason: "rest server port must be between 1 and 65535".into(),
            });
        }

        if server.template == ServerTemplate::OpenApi && server.spec_is_empty() {
            return Err(DomainError::MissingSpecContent {
                node: node.name.clone(),
            });
        }

        Ok(())
    }

    fn validate_node_name(node: &Node) -> Result<(), DomainError> {
        let name = node.name.trim();
        let reason = if name.is_empty() {
            Some("node name is empty")
        } else if name == "." || name == ".." {
            Some("node name cannot be '.' or '..'")
        } else if node.name.contains(['/', '\\']) {
            Some("node name cannot contain path separators")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidNode {
                node: node.name.clone(),
                reason: reason.into(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RestConfig, RestServerConfig};

    const REST_ONLY: &[Protocol] = &[Protocol::Rest];

    #[test]
    fn unsupported_grpc_is_reported_after_valid_rest() {
        let node = Node::new("api", "typescript")
            .with_rest(RestConfig::server(RestServerConfig::open_api(3000, "openapi: 3.0.0")))
            .with_grpc();

        assert_eq!(
            DomainValidator::validate_node(&node, Language::TypeScript, REST_ONLY),
            Err(DomainError::UnsupportedProtocol {
                protocol: "grpc".into(),
                language: "typescript".into(),
            })
        );
    }

    #[test]
    fn rest_errors_win_over_later_protocols() {
        let node = Node::new("api", "java")
            .with_rest(RestConfig::server(RestServerConfig::open_api(8080, "")))
            .with_ws();

        assert_eq!(
            DomainValidator::validate_node(&node, Language::Java, REST_ONLY),
            Err(DomainError::MissingSpecContent { node: "api".into() })
        );
    }

    #[test]
    fn compage_template_needs_no_spec() {
        let mut server = RestServerConfig::open_api(8080, "");
        server.template = ServerTemplate::Compage;
        let node = Node::new("api", "java").with_rest(RestConfig::server(server));

        assert!(DomainValidator::validate_node(&node, Language::Java, REST_ONLY).is_ok());
    }

    #[test]
    fn port_zero_is_invalid() {
        let node = Node::new("api", "java")
            .with_rest(RestConfig::server(RestServerConfig::open_api(0, "openapi: 3.0.0")));

        assert!(matches!(
            DomainValidator::validate_node(&node, Language::Java, REST_ONLY),
            Err(DomainError::InvalidNode { .. })
        ));
    }

    #[test]
    fn node_names_must_be_plain_directory_names() {
        for name in ["", "  ", "..", "a/b", "a\\b"] {
            let node = Node::new(name, "java");
            assert!(
                DomainValidator::validate_node(&node, Language::Java, REST_ONLY).is_err(),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn node_without_protocols_is_valid() {
        let node = Node::new("worker", "java");
        assert!(DomainValidator::validate_node(&node, Language::Java, REST_ONLY).is_ok());
    }
}
