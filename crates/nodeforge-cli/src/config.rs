//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `NODEFORGE__<SECTION>__<KEY>`, e.g.
//!    `NODEFORGE__GENERATION__JOBS=4`
//! 3. `--config FILE`, or else the user config file followed by
//!    `./.nodeforge.toml`
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use nodeforge_adapters::renderer::DEFAULT_BINARY;

use crate::cli::OutputFormat;

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".nodeforge.toml";

const ENV_PREFIX: &str = "NODEFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub templates: TemplateConfig,
    /// Fallbacks for descriptors that omit the repository identity.
    pub defaults: Defaults,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Parallel nodes; unset means one per CPU.
    pub jobs: Option<usize>,
    pub fail_fast: bool,
    pub renderer: RendererKind,
    pub openapi_generator_bin: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            jobs: None,
            fail_fast: false,
            renderer: RendererKind::Builtin,
            openapi_generator_bin: DEFAULT_BINARY.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub owner: Option<String>,
    pub repository: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

/// Which OpenAPI renderer drives source generation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    /// Built-in skeleton renderer, no external tools.
    #[default]
    Builtin,
    /// The external `openapi-generator-cli` tool.
    OpenapiGenerator,
}

impl AppConfig {
    /// Load configuration from the sources listed in the module docs.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                builder = builder.add_source(toml_file(path).required(true));
            }
            None => {
                builder = builder
                    .add_source(toml_file(&Self::config_path()).required(false))
                    .add_source(toml_file(Path::new(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration sources")?;

        config
            .try_deserialize()
            .context("configuration has invalid values")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.nodeforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "nodeforge", "nodeforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The defaults as a commented TOML document, as written by `init`.
    pub fn default_toml() -> anyhow::Result<String> {
        let body = toml::to_string_pretty(&Self::default())
            .context("failed to serialise default configuration")?;
        Ok(format!(
            "# nodeforge configuration\n\
             # Environment overrides: NODEFORGE__<SECTION>__<KEY>\n\n{body}"
        ))
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}
