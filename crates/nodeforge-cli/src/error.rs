//! Error handling for the nodeforge CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use nodeforge_core::error::ForgeError;

pub use nodeforge_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The project descriptor does not exist.
    #[error("Project file not found: {}", path.display())]
    ProjectFileNotFound { path: PathBuf },

    /// The project descriptor exists but cannot be used.
    #[error("Invalid project file {}: {reason}", path.display())]
    ProjectFile { path: PathBuf, reason: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The external generator writes straight to disk, so it cannot preview.
    #[error("--dry-run is not supported with the openapi-generator renderer")]
    DryRunUnsupported,

    /// An error propagated from `nodeforge-core`.
    #[error("Generation failed: {0}")]
    Core(#[from] ForgeError),

    /// One or more nodes failed; the others completed.
    #[error("{} of {total} node(s) failed: {}", failures.len(), failed_names(failures))]
    NodesFailed {
        failures: Vec<(String, ForgeError)>,
        total: usize,
    },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

fn failed_names(failures: &[(String, ForgeError)]) -> String {
    failures
        .iter()
        .map(|(node, _)| node.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// The failure that decides the category of a multi-node error: the
    /// first one that is not a knock-on cancellation.
    fn leading_failure(failures: &[(String, ForgeError)]) -> Option<&ForgeError> {
        failures
            .iter()
            .map(|(_, e)| e)
            .find(|e| e.category() != CoreCategory::Cancelled)
            .or_else(|| failures.first().map(|(_, e)| e))
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectFileNotFound { path } => vec![
                format!("No file at '{}'", path.display()),
                "Pass the path to a .yaml, .yml or .json project descriptor".into(),
            ],

            Self::ProjectFile { .. } => vec![
                "A descriptor needs `owner`, `repository` and a `nodes` list".into(),
                "Each node needs `name` and `language`".into(),
                "Check the descriptor with: nodeforge validate <file>".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'nodeforge init --force' to recreate a default config".into(),
            ],

            Self::DryRunUnsupported => vec![
                "Preview with the built-in renderer: --renderer builtin --dry-run".into(),
                "Or drop --dry-run to run openapi-generator for real".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::NodesFailed { failures, .. } => {
                let mut suggestions: Vec<String> = failures
                    .iter()
                    .map(|(node, err)| format!("{node}: {err}"))
                    .collect();
                if let Some(leading) = Self::leading_failure(failures) {
                    suggestions.extend(leading.suggestions());
                }
                suggestions
            }

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["Operation was cancelled before anything was written".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectFile { .. } | Self::DryRunUnsupported | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::ProjectFileNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => ErrorCategory::from_core(core.category()),
            Self::NodesFailed { failures, .. } => Self::leading_failure(failures)
                .map(|e| ErrorCategory::from_core(e.category()))
                .unwrap_or(ErrorCategory::Internal),
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] with no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

impl ErrorCategory {
    fn from_core(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation | CoreCategory::Compatibility | CoreCategory::Cancelled => {
                Self::UserError
            }
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Generation | CoreCategory::Internal => Self::Internal,
        }
    }
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
