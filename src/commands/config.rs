use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use parity::defaults::{self, LoadedConfig, ParityConfig};
use parity::log_status;

use super::{CmdResult, ConfigSourceArgs};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display the effective configuration
    Show {
        #[command(flatten)]
        source: ConfigSourceArgs,
    },
    /// Show the config file picked up from the working directory
    Path,
    /// List built-in presets
    Presets,
    /// Write a preset to parity.json (or parity.toml) in the working directory
    Init {
        /// Preset to write
        #[arg(long, default_value = defaults::DEFAULT_PRESET)]
        preset: String,

        /// Write TOML instead of JSON
        #[arg(long)]
        toml: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<ParityConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presets: Option<Vec<String>>,
}

impl ConfigOutput {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            config: None,
            path: None,
            exists: None,
            presets: None,
        }
    }
}

pub fn run(args: ConfigArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { source } => show(&source),
        ConfigCommand::Path => path(),
        ConfigCommand::Presets => presets(),
        ConfigCommand::Init {
            preset,
            toml,
            force,
        } => init(&preset, toml, force),
    }
}

fn show(source: &ConfigSourceArgs) -> CmdResult<ConfigOutput> {
    Ok((show_output(source.resolve()?), 0))
}

fn show_output(loaded: LoadedConfig) -> ConfigOutput {
    let mut output = ConfigOutput::new("config.show");
    output.path = loaded.path.map(|p| p.display().to_string());
    output.config = Some(loaded.config);
    output
}

fn working_dir() -> parity::Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        parity::Error::internal_io(e.to_string(), Some("resolve working directory".to_string()))
    })
}

fn path() -> CmdResult<ConfigOutput> {
    let found = defaults::discover_config(&working_dir()?);

    let mut output = ConfigOutput::new("config.path");
    output.exists = Some(found.is_some());
    output.path = found.map(|p| p.display().to_string());
    Ok((output, 0))
}

fn presets() -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.presets");
    output.presets = Some(defaults::preset_names());
    Ok((output, 0))
}

fn init(preset: &str, toml: bool, force: bool) -> CmdResult<ConfigOutput> {
    let config = defaults::preset(preset)?;
    let file_name = if toml { "parity.toml" } else { "parity.json" };
    let target = working_dir()?.join(file_name);

    defaults::save_config(&config, &target, force)?;
    log_status!("config", "Wrote {}", target.display());

    let mut output = ConfigOutput::new("config.init");
    output.path = Some(target.display().to_string());
    output.config = Some(config);
    Ok((output, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn show_reports_discovered_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("parity.toml"), "fuzzy = false\n").unwrap();

        let output = show_output(defaults::resolve_in_dir(dir.path()).unwrap());
        assert!(output.path.unwrap().ends_with("parity.toml"));
        assert!(!output.config.unwrap().fuzzy);
    }

    #[test]
    fn show_from_preset_has_no_path() {
        let source = ConfigSourceArgs {
            config: None,
            preset: Some("blank".to_string()),
        };
        let (output, code) = show(&source).unwrap();
        assert_eq!(code, 0);
        assert!(output.path.is_none());
        assert!(output.config.unwrap().aliases.is_empty());
    }

    #[test]
    fn show_reports_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, "{}").unwrap();

        let source = ConfigSourceArgs {
            config: Some(path.clone()),
            preset: None,
        };
        let (output, _) = show(&source).unwrap();
        assert_eq!(output.path, Some(path.display().to_string()));
    }
}
