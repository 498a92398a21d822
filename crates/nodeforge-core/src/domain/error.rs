// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is a configuration-authoring problem detected before any file
/// is written. None of them is transient.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("node '{node}': rest server uses the openApi template but the OpenAPI spec content is empty")]
    MissingSpecContent { node: String },

    #[error("invalid node '{node}': {reason}")]
    InvalidNode { node: String, reason: String },

    #[error("duplicate node '{node}': node directories would overlap")]
    DuplicateNode { node: String },

    #[error("unknown protocol: {protocol}")]
    UnknownProtocol { protocol: String },

    #[error("invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: String, reason: String },

    // ========================================================================
    // Compatibility Errors (409-level equivalent)
    // ========================================================================
    #[error("unsupported protocol {protocol} for language {language}")]
    UnsupportedProtocol { protocol: String, language: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("unsupported language '{language}': no backend is registered for it")]
    UnsupportedLanguage { language: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingSpecContent { node } => vec![
                format!("Add the OpenAPI document to node '{node}'"),
                "Set restConfig.server.openApiSpecContent to the YAML of the spec".into(),
                "Or switch restConfig.server.template away from openApi".into(),
            ],
            Self::UnsupportedProtocol { protocol, language } => vec![
                format!("{language} nodes cannot expose {protocol} yet"),
                format!("Remove {protocol}Config from the node"),
                "Try: nodeforge languages to see supported protocols".into(),
            ],
            Self::UnsupportedLanguage { language } => vec![
                format!("'{language}' has no generation backend"),
                "Try: nodeforge languages to list registered backends".into(),
            ],
            Self::DuplicateNode { node } => vec![
                format!("Two nodes are named '{node}'"),
                "Give every node in the project a unique name".into(),
            ],
            Self::InvalidNode { reason, .. } => vec![
                "Check the node definition in the project file".into(),
                format!("Details: {reason}"),
            ],
            Self::UnknownProtocol { .. } => vec!["Known protocols: rest, grpc, ws".into()],
            Self::InvalidOutputPath { path, .. } => vec![
                format!("Generated path '{path}' is not usable"),
                "Check node names for path separators".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingSpecContent { .. }
            | Self::InvalidNode { .. }
            | Self::DuplicateNode { .. }
            | Self::UnknownProtocol { .. }
            | Self::InvalidOutputPath { .. } => ErrorCategory::Validation,
            Self::UnsupportedProtocol { .. } => ErrorCategory::Compatibility,
            Self::UnsupportedLanguage { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_protocol_message_names_both_sides() {
        let err = DomainError::UnsupportedProtocol {
            protocol: "grpc".into(),
            language: "typescript".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported protocol grpc for language typescript"
        );
        assert_eq!(err.category(), ErrorCategory::Compatibility);
    }

    #[test]
    fn missing_spec_suggests_the_field() {
        let err = DomainError::MissingSpecContent {
            node: "users".into(),
        };
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("openApiSpecContent"))
        );
    }
}
