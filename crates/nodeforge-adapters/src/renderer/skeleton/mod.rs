//! Built-in OpenAPI skeleton renderer.
//!
//! Produces a small, runnable server for each supported language: one route
//! stub per OpenAPI operation, a container build file and the OpenAPI
//! document itself (`openapi.yaml`). Existing files are overwritten, so
//! rendering twice leaves the same tree.

mod java;
mod typescript;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use nodeforge_core::{
    application::{
        RenderError, RenderRequest,
        ports::{Filesystem, OpenApiRenderer},
        services::write_structure,
    },
    domain::{
        Language, ProjectStructure,
        entities::render::{to_camel_case, to_pascal_case},
    },
};

use super::openapi::OpenApiDocument;

pub const SPEC_FILE_NAME: &str = "openapi.yaml";

pub struct SkeletonRenderer {
    filesystem: Arc<dyn Filesystem>,
}

impl SkeletonRenderer {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Build the structure without writing it.
    pub fn plan(&self, request: &RenderRequest) -> Result<ProjectStructure, RenderError> {
        let document = OpenApiDocument::parse(&request.spec_content)?;

        let structure = ProjectStructure::new(&request.output_dir)
            .with_file(SPEC_FILE_NAME, request.spec_content.clone());

        match request.language {
            Language::Java => Ok(java::skeleton(structure, request, &document)),
            Language::TypeScript => Ok(typescript::skeleton(structure, request, &document)),
            other => Err(RenderError::UnsupportedLanguage {
                language: other.to_string(),
            }),
        }
    }
}

/// Body of a double-quoted Java or TypeScript string literal.
pub(super) fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Single-line comment text that cannot close a block comment.
pub(super) fn comment_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "*\\/")
}

/// camelCase identifier, never starting with a digit.
pub(super) fn identifier(s: &str, fallback: &str) -> String {
    let ident = to_camel_case(s);
    match ident.chars().next() {
        None => fallback.into(),
        Some(c) if c.is_ascii_digit() => format!("op{}", to_pascal_case(s)),
        Some(_) => ident,
    }
}

impl OpenApiRenderer for SkeletonRenderer {
    #[instrument(skip_all, fields(node = %request.node_name, language = %request.language))]
    fn render(&self, request: &RenderRequest) -> Result<Vec<PathBuf>, RenderError> {
        let structure = self.plan(request)?;
        let written = write_structure(self.filesystem.as_ref(), &structure)?;
        info!(files = written.len(), "Skeleton rendered");
        Ok(written)
    }
}
