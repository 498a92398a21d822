//! Implementation of the `nodeforge validate` command.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use nodeforge_adapters::MemoryFilesystem;
use nodeforge_core::{domain::DomainValidator, error::ForgeError};

use crate::{
    cli::ValidateArgs,
    commands::build_registry,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    project::{Identity, load_project},
};

#[derive(Debug, Serialize)]
struct NodeCheck {
    node: String,
    language: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the validation phase of every node. Nothing is written.
#[instrument(skip_all, fields(project = %args.project.display()))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = load_project(&args.project, &Identity::default(), &config.defaults)?;
    DomainValidator::validate_project(&project).map_err(ForgeError::from)?;

    // The renderer never runs during validation; any adapter will do.
    let registry = build_registry(
        config.generation.renderer,
        None,
        &config,
        Arc::new(MemoryFilesystem::new()),
    )?;

    let mut checks = Vec::with_capacity(project.nodes.len());
    let mut failures = Vec::new();
    for node in &project.nodes {
        let result = registry.validate_node(node);
        checks.push(NodeCheck {
            node: node.name.clone(),
            language: node.language.clone(),
            valid: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
        });
        if let Err(e) = result {
            failures.push((node.name.clone(), ForgeError::from(e)));
        }
    }

    if output.is_json() {
        output.json(&checks)?;
    } else {
        for check in &checks {
            match &check.error {
                None => output.success(&format!("{} ({})", check.node, check.language))?,
                Some(error) => output.error(&format!("{}: {error}", check.node))?,
            }
        }
    }

    if failures.is_empty() {
        if !output.is_json() {
            output.success(&format!("{} node(s) valid", checks.len()))?;
        }
        return Ok(());
    }
    Err(CliError::NodesFailed {
        failures,
        total: checks.len(),
    })
}
