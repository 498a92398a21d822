//! `nodeforge init`: create a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Where `init` writes: `--local`, then `--config`, then the user config dir.
fn target_path(args: &InitArgs, global: &GlobalArgs) -> PathBuf {
    if args.local {
        return PathBuf::from(LOCAL_CONFIG_FILE);
    }
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(&args, &global);

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = AppConfig::default_toml().map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: None,
    })?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn global(config: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config,
            output_format: OutputFormat::Plain,
            log_file: None,
        }
    }

    #[test]
    fn local_flag_wins() {
        let args = InitArgs {
            local: true,
            force: false,
        };
        assert_eq!(
            target_path(&args, &global(Some("x.toml".into()))),
            PathBuf::from(LOCAL_CONFIG_FILE)
        );
    }

    #[test]
    fn explicit_config_path_is_used() {
        let args = InitArgs {
            local: false,
            force: false,
        };
        assert_eq!(
            target_path(&args, &global(Some("x.toml".into()))),
            PathBuf::from("x.toml")
        );
        assert_eq!(target_path(&args, &global(None)), AppConfig::config_path());
    }
}
