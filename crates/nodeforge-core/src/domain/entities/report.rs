use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::{Language, Protocol};

/// Per-node pipeline stage. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
    Validating,
    Rendering,
    Skipped,
    EmittingManifests,
    Done,
    Failed,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validating => "validating",
            Self::Rendering => "rendering",
            Self::Skipped => "skipped",
            Self::EmittingManifests => "emitting_manifests",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Why no source was rendered for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No protocol configured.
    NoProtocol,
    /// REST configured without a server.
    ClientOnly,
    /// Server template has no renderer in this backend.
    TemplateNotRendered,
    /// Only protocols without a rendering path are configured.
    NoRenderingPath,
}

/// Result of the source step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Rendered {
        protocol: Protocol,
        files: Vec<PathBuf>,
    },
    Skipped {
        reason: SkipReason,
    },
}

impl SourceOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// What one successful node generation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeReport {
    pub node: String,
    pub language: Language,
    pub directory: PathBuf,
    pub source: SourceOutcome,
    pub manifests: Vec<PathBuf>,
}

impl NodeReport {
    pub fn files_written(&self) -> usize {
        let source = match &self.source {
            SourceOutcome::Rendered { files, .. } => files.len(),
            SourceOutcome::Skipped { .. } => 0,
        };
        source + self.manifests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_match_between_logs_and_json() {
        let stages = [
            GenerationStage::Validating,
            GenerationStage::Rendering,
            GenerationStage::Skipped,
            GenerationStage::EmittingManifests,
            GenerationStage::Done,
            GenerationStage::Failed,
        ];
        for stage in stages {
            let json = serde_json::to_value(stage).unwrap();
            assert_eq!(json, serde_json::Value::String(stage.to_string()));
        }
        assert_eq!(GenerationStage::Failed.to_string(), "failed");
    }
}
