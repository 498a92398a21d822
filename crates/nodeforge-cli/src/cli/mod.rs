//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::RendererKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "nodeforge",
    bin_name = "nodeforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Service node generation",
    long_about = "nodeforge turns a project descriptor into per-node source \
                  skeletons and Kubernetes manifests.",
    after_help = "EXAMPLES:\n\
        \x20 nodeforge generate project.yaml -o ./out\n\
        \x20 nodeforge validate project.json\n\
        \x20 nodeforge languages --format json\n\
        \x20 nodeforge completions bash > /usr/share/bash-completion/completions/nodeforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate every node of a project descriptor.
    #[command(
        visible_alias = "gen",
        about = "Generate source skeletons and manifests",
        after_help = "EXAMPLES:\n\
            \x20 nodeforge generate project.yaml\n\
            \x20 nodeforge generate project.yaml -o ./out --jobs 4 --fail-fast\n\
            \x20 nodeforge generate project.json --dry-run --output-format json"
    )]
    Generate(GenerateArgs),

    /// Check a project descriptor without writing anything.
    #[command(
        about = "Validate a project descriptor",
        after_help = "EXAMPLES:\n\
            \x20 nodeforge validate project.yaml"
    )]
    Validate(ValidateArgs),

    /// List languages with a generation backend.
    #[command(
        visible_alias = "ls",
        about = "List supported languages",
        after_help = "EXAMPLES:\n\
            \x20 nodeforge languages\n\
            \x20 nodeforge languages --all\n\
            \x20 nodeforge languages --format json"
    )]
    Languages(LanguagesArgs),

    /// Initialise a nodeforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 nodeforge init          # user config directory\n\
            \x20 nodeforge init --local  # .nodeforge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 nodeforge completions bash > ~/.local/share/bash-completion/completions/nodeforge\n\
            \x20 nodeforge completions zsh  > ~/.zfunc/_nodeforge\n\
            \x20 nodeforge completions fish > ~/.config/fish/completions/nodeforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the nodeforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 nodeforge config get generation.jobs\n\
            \x20 nodeforge config list\n\
            \x20 nodeforge config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `nodeforge generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project descriptor (`.yaml`, `.yml` or `.json`).
    #[arg(value_name = "PROJECT", help = "Project descriptor file")]
    pub project: PathBuf,

    /// Directory that receives one subdirectory per node.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory"
    )]
    pub output: PathBuf,

    /// Nodes generated at once.
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..),
        help = "Nodes generated in parallel (default: CPU count)"
    )]
    pub jobs: Option<u16>,

    /// Stop starting new nodes after the first failure.
    #[arg(long = "fail-fast", help = "Cancel remaining nodes on first failure")]
    pub fail_fast: bool,

    /// Run the whole pipeline in memory and list the files it would write.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,

    /// Directory with `<language>/kubernetes/*.tmpl` overrides.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Manifest templates directory"
    )]
    pub templates: Option<PathBuf>,

    /// Source renderer for REST/OpenAPI servers.
    #[arg(long = "renderer", value_enum, help = "OpenAPI renderer")]
    pub renderer: Option<RendererKind>,

    /// Override the descriptor's owner.
    #[arg(long = "owner", value_name = "NAME", help = "Repository owner")]
    pub owner: Option<String>,

    /// Override the descriptor's repository.
    #[arg(long = "repository", value_name = "NAME", help = "Repository name")]
    pub repository: Option<String>,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `nodeforge validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Project descriptor (`.yaml`, `.yml` or `.json`).
    #[arg(value_name = "PROJECT", help = "Project descriptor file")]
    pub project: PathBuf,
}

// ── languages ─────────────────────────────────────────────────────────────────

/// Arguments for `nodeforge languages`.
#[derive(Debug, Args)]
pub struct LanguagesArgs {
    /// Include languages known to the node model but without a backend.
    #[arg(long = "all", help = "Show languages without a backend too")]
    pub all: bool,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `languages` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `nodeforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.nodeforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `nodeforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `nodeforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.jobs`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "nodeforge",
            "generate",
            "project.yaml",
            "-o",
            "out",
            "--jobs",
            "2",
            "--fail-fast",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.project, PathBuf::from("project.yaml"));
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.jobs, Some(2));
        assert!(args.fail_fast);
        assert!(!args.dry_run);
    }

    #[test]
    fn generate_output_defaults_to_cwd() {
        let cli = Cli::parse_from(["nodeforge", "gen", "p.json"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.output, PathBuf::from("."));
        assert_eq!(args.renderer, None);
    }

    #[test]
    fn zero_jobs_is_rejected() {
        assert!(Cli::try_parse_from(["nodeforge", "generate", "p.yaml", "--jobs", "0"]).is_err());
    }

    #[test]
    fn renderer_accepts_kebab_case() {
        let cli = Cli::parse_from([
            "nodeforge",
            "generate",
            "p.yaml",
            "--renderer",
            "openapi-generator",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.renderer, Some(RendererKind::OpenapiGenerator));
    }

    #[test]
    fn languages_alias() {
        let cli = Cli::parse_from(["nodeforge", "ls", "--format", "json"]);
        let Commands::Languages(args) = cli.command else {
            panic!("expected Languages command");
        };
        assert_eq!(args.format, ListFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["nodeforge", "--quiet", "--verbose", "languages"]);
        assert!(result.is_err());
    }
}
