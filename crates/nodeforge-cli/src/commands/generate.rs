//! Implementation of the `nodeforge generate` command.
//!
//! Responsibility: load the descriptor, wire the adapters, run the core
//! orchestrator and display the report. No business logic lives here.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use nodeforge_adapters::{LocalFilesystem, MemoryFilesystem};
use nodeforge_core::{
    application::{Filesystem, Orchestrator, OrchestratorOptions, ProjectReport},
    domain::{NodeReport, Project, SkipReason, SourceOutcome},
};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    commands::build_registry,
    config::{AppConfig, RendererKind},
    error::{CliError, CliResult},
    output::OutputManager,
    project::{Identity, load_project},
};

/// Execute the `nodeforge generate` command.
///
/// 1. Load the descriptor and resolve the repository identity
/// 2. Refuse a dry run the selected renderer cannot honor, then confirm with the user unless `--yes`, `--quiet`, `--dry-run` or JSON output
/// 3. Run every node through the orchestrator
/// 4. Print the report; any failed node turns into a non-zero exit
#[instrument(skip_all, fields(project = %args.project.display()))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let identity = Identity {
        owner: args.owner.clone(),
        repository: args.repository.clone(),
    };
    let project = load_project(&args.project, &identity, &config.defaults)?;
    let options = orchestrator_options(&args, &config);
    let renderer = args.renderer.unwrap_or(config.generation.renderer);

    debug!(
        owner = %project.owner,
        repository = %project.repository,
        nodes = project.nodes.len(),
        jobs = options.jobs,
        fail_fast = options.fail_fast,
        ?renderer,
        "Project loaded"
    );

    if args.dry_run && renderer == RendererKind::OpenapiGenerator {
        return Err(CliError::DryRunUnsupported);
    }

    if !args.yes && !args.dry_run && !global.quiet && !output.is_json() {
        show_plan(&project, &args.output, &output)?;
        if !confirm(&format!(
            "Generate {} node(s) into {}?",
            project.nodes.len(),
            args.output.display()
        ))? {
            return Err(CliError::Cancelled);
        }
    }

    let memory = args.dry_run.then(MemoryFilesystem::new);
    let filesystem: Arc<dyn Filesystem> = match &memory {
        Some(memory) => Arc::new(memory.clone()),
        None => Arc::new(LocalFilesystem::new()),
    };
    let templates = args.templates.clone().or(config.templates.local_path.clone());
    let registry = build_registry(renderer, templates, &config, filesystem)?;
    let orchestrator = Orchestrator::new(Arc::new(registry), options);

    let started_at = Utc::now();
    let spinner = output.spinner(format!("Generating {} node(s)...", project.nodes.len()));
    let result = orchestrator.generate_project(&project, &args.output);
    spinner.finish_and_clear();
    let report = result?;
    let finished_at = Utc::now();

    info!(run_id = %report.run_id, failed = report.failed.len(), "Generation finished");

    if output.is_json() {
        output.json(&GenerateSummary::new(
            &report,
            &args.output,
            args.dry_run,
            started_at,
            finished_at,
        ))?;
    } else {
        print_report(&project, &report, memory.as_ref(), &output)?;
    }

    into_result(report)
}

fn orchestrator_options(args: &GenerateArgs, config: &AppConfig) -> OrchestratorOptions {
    let defaults = OrchestratorOptions::default();
    OrchestratorOptions {
        jobs: args
            .jobs
            .map(usize::from)
            .or(config.generation.jobs)
            .filter(|&jobs| jobs > 0)
            .unwrap_or(defaults.jobs),
        fail_fast: args.fail_fast || config.generation.fail_fast,
    }
}

fn into_result(report: ProjectReport) -> CliResult<()> {
    if report.is_success() {
        return Ok(());
    }
    let total = report.total();
    Err(CliError::NodesFailed {
        failures: report
            .failed
            .into_iter()
            .map(|failure| (failure.node, failure.error))
            .collect(),
        total,
    })
}

// ── JSON report ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateSummary<'a> {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    output: &'a Path,
    dry_run: bool,
    succeeded: &'a [NodeReport],
    failed: Vec<FailureView<'a>>,
}

#[derive(Debug, Serialize)]
struct FailureView<'a> {
    node: &'a str,
    error: String,
    category: String,
}

impl<'a> GenerateSummary<'a> {
    fn new(
        report: &'a ProjectReport,
        output: &'a Path,
        dry_run: bool,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id: report.run_id,
            started_at,
            finished_at,
            output,
            dry_run,
            succeeded: &report.succeeded,
            failed: report
                .failed
                .iter()
                .map(|f| FailureView {
                    node: &f.node,
                    error: f.error.to_string(),
                    category: format!("{:?}", f.error.category()).to_lowercase(),
                })
                .collect(),
        }
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn skip_text(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NoProtocol => "no protocol configured",
        SkipReason::ClientOnly => "REST client only",
        SkipReason::TemplateNotRendered => "server template has no renderer",
        SkipReason::NoRenderingPath => "no renderer for the configured protocols",
    }
}

fn show_plan(project: &Project, output_dir: &Path, out: &OutputManager) -> CliResult<()> {
    out.header("Plan")?;
    out.print(&format!(
        "  Repository:   {}/{}",
        project.owner, project.repository
    ))?;
    out.print(&format!("  Location:     {}", output_dir.display()))?;
    for node in &project.nodes {
        out.print(&format!("  Node:         {} ({})", node.name, node.language))?;
    }
    out.print("")?;
    Ok(())
}

fn print_report(
    project: &Project,
    report: &ProjectReport,
    memory: Option<&MemoryFilesystem>,
    out: &OutputManager,
) -> CliResult<()> {
    out.header(&format!(
        "{}/{}: {} of {} node(s) generated",
        project.owner,
        project.repository,
        report.succeeded.len(),
        report.total()
    ))?;

    for node in &report.succeeded {
        out.success(&format!(
            "{} ({}): {} file(s) in {}",
            node.node,
            node.language,
            node.files_written(),
            node.directory.display()
        ))?;
        if let SourceOutcome::Skipped { reason } = node.source {
            out.info(&format!("  source skipped: {}", skip_text(reason)))?;
        }
    }

    for failure in &report.failed {
        out.error(&format!("{}: {}", failure.node, failure.error))?;
    }

    if let Some(memory) = memory {
        out.print("")?;
        out.info("Dry run: nothing was written. Files that would be created:")?;
        for path in memory.list_files() {
            out.print(&format!("  {}", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::IsTerminal as _;

    // Nobody to ask when piped.
    if !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
