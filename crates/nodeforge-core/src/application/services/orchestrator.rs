//! Project-level generation.
//!
//! Nodes are independent: each gets its own directory and context, so they
//! run in parallel on a `rayon` pool when more than one job is allowed. Every
//! node is attempted and failures are collected. With `fail_fast`, the first
//! failure cancels the nodes that have not started yet.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, services::registry::BackendRegistry},
    domain::{DomainValidator, Node, NodeReport, Project},
    error::{ForgeError, ForgeResult},
};

/// Cooperative cancellation, checked before each node starts.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Maximum nodes generated at once. `1` runs sequentially in order.
    pub jobs: usize,
    pub fail_fast: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            fail_fast: false,
        }
    }
}

/// One node that did not generate.
#[derive(Debug, Clone)]
pub struct NodeFailure {
    pub node: String,
    pub error: ForgeError,
}

/// Outcome of a project run. Nodes keep project order in both lists.
#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub run_id: Uuid,
    pub succeeded: Vec<NodeReport>,
    pub failed: Vec<NodeFailure>,
}

impl ProjectReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// `ProjectFailed` naming every failed node, if any failed.
    pub fn ensure_success(&self) -> Result<(), ApplicationError> {
        if self.is_success() {
            return Ok(());
        }
        Err(ApplicationError::ProjectFailed {
            failed: self.failed.iter().map(|f| f.node.clone()).collect(),
            total: self.total(),
        })
    }
}

pub struct Orchestrator {
    registry: Arc<BackendRegistry>,
    options: OrchestratorOptions,
    cancellation: CancellationToken,
}

impl Orchestrator {
    pub fn new(registry: Arc<BackendRegistry>, options: OrchestratorOptions) -> Self {
        Self {
            registry,
            options,
            cancellation: CancellationToken::new(),
        }
    }

    /// Use an externally owned token (for example one cancelled on Ctrl-C).
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Generate every node of `project` under `output_root/<node name>`.
    ///
    /// Returns `Err` only when the project itself is unusable (duplicate or
    /// malformed node names, worker pool failure). Node failures are in the
    /// report.
    #[instrument(
        skip_all,
        fields(
            owner = %project.owner,
            repository = %project.repository,
            nodes = project.nodes.len(),
            output = %output_root.display()
        )
    )]
    pub fn generate_project(
        &self,
        project: &Project,
        output_root: &Path,
    ) -> ForgeResult<ProjectReport> {
        DomainValidator::validate_project(project)?;

        let run_id = Uuid::new_v4();
        info!(%run_id, jobs = self.options.jobs, "Generating project");

        // Fail-fast stops this run only; the external token is never set here.
        let aborted = CancellationToken::new();
        let run = |node: &Node| {
            (
                node.name.clone(),
                self.run_node(project, node, output_root, &aborted),
            )
        };

        let results: Vec<(String, ForgeResult<NodeReport>)> =
            if self.options.jobs <= 1 || project.nodes.len() <= 1 {
                project.nodes.iter().map(run).collect()
            } else {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(self.options.jobs)
                    .build()
                    .map_err(|e| ApplicationError::WorkerPool {
                        reason: e.to_string(),
                    })?;
                pool.install(|| project.nodes.par_iter().map(run).collect())
            };

        let mut report = ProjectReport {
            run_id,
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for (node, result) in results {
            match result {
                Ok(node_report) => report.succeeded.push(node_report),
                Err(error) => report.failed.push(NodeFailure { node, error }),
            }
        }

        if report.is_success() {
            info!(%run_id, nodes = report.total(), "Project generated");
        } else {
            warn!(
                %run_id,
                failed = report.failed.len(),
                total = report.total(),
                "Project generated with failures"
            );
        }
        Ok(report)
    }

    fn run_node(
        &self,
        project: &Project,
        node: &Node,
        output_root: &Path,
        aborted: &CancellationToken,
    ) -> ForgeResult<NodeReport> {
        if self.cancellation.is_cancelled() || aborted.is_cancelled() {
            return Err(ApplicationError::Cancelled {
                node: node.name.clone(),
            }
            .into());
        }

        let context = project.context_for(node, output_root);
        let result = self.registry.generate_node(&context);

        if let Err(e) = &result {
            error!(node = %node.name, error = %e, "Node failed");
            if self.options.fail_fast {
                aborted.cancel();
            }
        }
        result
    }
}
