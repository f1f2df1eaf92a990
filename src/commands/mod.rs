use std::path::PathBuf;

use clap::Args;

use parity::defaults::{self, LoadedConfig, ParityConfig};
use parity::parity::AliasEntry;

pub type CmdResult<T> = parity::Result<(T, i32)>;

/// Shared arguments selecting the configuration.
///
/// Resolution order: `--config FILE`, then `--preset NAME`, then a
/// `parity.json` / `parity.toml` in the working directory, then the
/// built-in default preset.
#[derive(Args, Default, Debug)]
pub struct ConfigSourceArgs {
    /// Config file (JSON or TOML, by extension)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Built-in preset name
    #[arg(long, value_name = "NAME", conflicts_with = "config")]
    pub preset: Option<String>,
}

impl ConfigSourceArgs {
    pub fn load(&self) -> parity::Result<ParityConfig> {
        self.resolve().map(|loaded| loaded.config)
    }

    /// Load the configuration and report which file, if any, supplied it.
    pub fn resolve(&self) -> parity::Result<LoadedConfig> {
        defaults::resolve_config(self.config.as_deref(), self.preset.as_deref())
    }
}

/// Parse repeated `--alias SOURCE=TARGET` flags.
pub fn parse_aliases(raw: &[String]) -> parity::Result<Vec<AliasEntry>> {
    raw.iter().map(|s| s.parse::<AliasEntry>()).collect()
}

pub mod compare;
pub mod config;
pub mod normalize;

pub(crate) fn run_raw(command: crate::Commands) -> parity::Result<(String, i32)> {
    match command {
        crate::Commands::Compare(args) => compare::run_raw(args),
        _ => Err(parity::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support text output",
            None,
            None,
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (parity::Result<serde_json::Value>, i32) {
    crate::tty::status("parity is working...");

    match command {
        crate::Commands::Compare(args) => dispatch!(args, compare),
        crate::Commands::Normalize(args) => dispatch!(args, normalize),
        crate::Commands::Config(args) => dispatch!(args, config),
    }
}
