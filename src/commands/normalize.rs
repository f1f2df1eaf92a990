use clap::{Args, ValueEnum};
use serde::Serialize;

use parity::defaults::ParityConfig;
use parity::parity::normalize;

use super::{CmdResult, ConfigSourceArgs};

#[derive(Args)]
pub struct NormalizeArgs {
    /// File names (or paths) to normalize
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Only apply one side's convention
    #[arg(long, value_enum)]
    pub side: Option<Side>,

    #[command(flatten)]
    pub source: ConfigSourceArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Serialize)]
pub struct NormalizedName {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "command", rename = "normalize")]
pub struct NormalizeOutput {
    pub left_label: String,
    pub right_label: String,
    pub names: Vec<NormalizedName>,
    /// Names no applied convention recognized.
    pub unrecognized: usize,
}

pub fn run(args: NormalizeArgs) -> CmdResult<NormalizeOutput> {
    let config = args.source.load()?;
    Ok((normalize_names(&args.names, args.side, &config), 0))
}

fn normalize_names(names: &[String], side: Option<Side>, config: &ParityConfig) -> NormalizeOutput {
    let use_left = side != Some(Side::Right);
    let use_right = side != Some(Side::Left);

    let names: Vec<NormalizedName> = names
        .iter()
        .map(|name| NormalizedName {
            name: name.clone(),
            left: use_left
                .then(|| normalize(name, &config.left.convention))
                .flatten(),
            right: use_right
                .then(|| normalize(name, &config.right.convention))
                .flatten(),
        })
        .collect();

    let unrecognized = names
        .iter()
        .filter(|n| n.left.is_none() && n.right.is_none())
        .count();

    NormalizeOutput {
        left_label: config.left.convention.label.clone(),
        right_label: config.right.convention.label.clone(),
        names,
        unrecognized,
    }
}
