//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the collaborators
//! behind the ports. Configuration mistakes are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Failure reported by an `OpenApiRenderer`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid OpenAPI document: {reason}")]
    InvalidSpec { reason: String },

    #[error("renderer has no output for language {language}")]
    UnsupportedLanguage { language: String },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("`{command}` failed: {reason}")]
    Tool { command: String, reason: String },
}

/// Failure reported by the Kubernetes manifest step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ManifestError {
    #[error("no manifest templates found under {root}")]
    NoTemplates { root: PathBuf },

    #[error("failed to read templates from {root}: {reason}")]
    Read { root: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The renderer failed for a node's REST server.
    #[error("template rendering failed for node '{node}': {source}")]
    TemplateRenderingFailed { node: String, source: RenderError },

    /// Manifest generation failed after the source step.
    #[error("kubernetes manifests failed for node '{node}': {source}")]
    ManifestFailed { node: String, source: ManifestError },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared state access failed (lock poisoned).
    #[error("in-memory store lock poisoned")]
    StoreLockError,

    /// The node never started because the run was cancelled.
    #[error("node '{node}' was cancelled before it started")]
    Cancelled { node: String },

    /// The parallel worker pool could not be created.
    #[error("worker pool setup failed: {reason}")]
    WorkerPool { reason: String },

    /// At least one node of a project failed.
    #[error("{} of {total} node(s) failed: {}", failed.len(), failed.join(", "))]
    ProjectFailed { failed: Vec<String>, total: usize },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateRenderingFailed { source, .. } => match source {
                RenderError::InvalidSpec { .. } => vec![
                    "Check that openApiSpecContent is valid OpenAPI YAML or JSON".into(),
                ],
                RenderError::Tool { command, .. } => vec![
                    format!("Make sure `{command}` is installed and on PATH"),
                    "Or set generation.renderer = \"builtin\" in the config".into(),
                ],
                _ => vec!["Check the renderer output above".into()],
            },
            Self::ManifestFailed { source, .. } => match source {
                ManifestError::NoTemplates { root } | ManifestError::Read { root, .. } => vec![
                    format!("Expected *.tmpl files under {}", root.display()),
                    "Check templates.local_path in the config".into(),
                ],
                ManifestError::Write { .. } => {
                    vec!["Check that you have write permissions".into()]
                }
            },
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec!["Another thread panicked while writing".into()],
            Self::Cancelled { .. } => vec![
                "An earlier node failed and --fail-fast stopped the run".into(),
                "Fix the first failure, or run without --fail-fast".into(),
            ],
            Self::ProjectFailed { failed, .. } => vec![
                format!("Failed nodes: {}", failed.join(", ")),
                "Run with -v to see each node's error".into(),
            ],
            Self::WorkerPool { .. } => vec!["Try a lower --jobs value".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestFailed {
                source: ManifestError::NoTemplates { .. },
                ..
            } => ErrorCategory::NotFound,
            Self::TemplateRenderingFailed {
                source: RenderError::InvalidSpec { .. },
                ..
            } => ErrorCategory::Validation,
            Self::TemplateRenderingFailed { .. }
            | Self::ManifestFailed { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError
            | Self::WorkerPool { .. } => ErrorCategory::Internal,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
            Self::ProjectFailed { .. } => ErrorCategory::Generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_failure_keeps_the_cause() {
        let err = ApplicationError::TemplateRenderingFailed {
            node: "api".into(),
            source: RenderError::InvalidSpec {
                reason: "bad yaml".into(),
            },
        };
        assert!(err.to_string().contains("bad yaml"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn project_failure_lists_nodes() {
        let err = ApplicationError::ProjectFailed {
            failed: vec!["a".into(), "b".into()],
            total: 3,
        };
        assert_eq!(err.to_string(), "2 of 3 node(s) failed: a, b");
    }
}
