use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

use parity::defaults::{ParityConfig, SideConfig};
use parity::inventory;
use parity::parity::report::{self, SuggestionFormat};
use parity::parity::{self as reconciliation, ReconciliationResult};

use super::{CmdResult, ConfigSourceArgs};

#[derive(Args)]
pub struct CompareArgs {
    /// Left inventory root (defaults to the configured left root)
    pub left: Option<PathBuf>,

    /// Right inventory root (defaults to the configured right root)
    pub right: Option<PathBuf>,

    #[command(flatten)]
    pub source: ConfigSourceArgs,

    /// Additional alias, applied after the configured table (repeatable)
    #[arg(long = "alias", value_name = "SOURCE=TARGET")]
    pub aliases: Vec<String>,

    /// Skip the substring fallback pass
    #[arg(long)]
    pub no_fuzzy: bool,

    /// Print a plain-text report instead of JSON
    #[arg(long, conflicts_with = "suggest")]
    pub text: bool,

    /// Print fuzzy pairs as an alias snippet for the config file
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub suggest: Option<SuggestArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SuggestArg {
    Json,
    Toml,
}

impl From<SuggestArg> for SuggestionFormat {
    fn from(arg: SuggestArg) -> Self {
        match arg {
            SuggestArg::Json => SuggestionFormat::Json,
            SuggestArg::Toml => SuggestionFormat::Toml,
        }
    }
}

/// Whether this invocation prints raw text instead of the JSON envelope.
pub fn is_raw(args: &CompareArgs) -> bool {
    args.text || args.suggest.is_some()
}

#[derive(Debug, Serialize)]
pub struct SideReport {
    pub label: String,
    pub root: String,
    pub files_scanned: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "command", rename = "compare")]
pub struct CompareOutput {
    pub left: SideReport,
    pub right: SideReport,
    #[serde(flatten)]
    pub result: ReconciliationResult,
}

pub fn run(args: CompareArgs) -> CmdResult<CompareOutput> {
    let output = execute(&args)?;
    let exit_code = exit_code(&output.result);
    Ok((output, exit_code))
}

pub fn run_raw(args: CompareArgs) -> parity::Result<(String, i32)> {
    let output = execute(&args)?;
    let exit_code = exit_code(&output.result);

    let content = match args.suggest {
        Some(format) => {
            let suggestions = output.result.suggested_aliases();
            report::render_suggestions(&suggestions, format.into())?
        }
        None => report::render_text(&output.result, &output.left.label, &output.right.label),
    };

    Ok((content, exit_code))
}

fn exit_code(result: &ReconciliationResult) -> i32 {
    if result.unresolved.is_empty() {
        0
    } else {
        1
    }
}

fn execute(args: &CompareArgs) -> parity::Result<CompareOutput> {
    let mut config = args.source.load()?;
    apply_overrides(&mut config, args)?;

    let left_root = side_root(args.left.as_deref(), &config.left, "left")?;
    let right_root = side_root(args.right.as_deref(), &config.right, "right")?;

    let left_names = inventory::collect_file_names(&left_root, &config.left.skip_dirs)?;
    let right_names = inventory::collect_file_names(&right_root, &config.right.skip_dirs)?;

    let result = reconciliation::reconcile_inventories(&left_names, &right_names, &config);

    Ok(CompareOutput {
        left: SideReport {
            label: config.left.convention.label.clone(),
            root: left_root.display().to_string(),
            files_scanned: left_names.len(),
        },
        right: SideReport {
            label: config.right.convention.label.clone(),
            root: right_root.display().to_string(),
            files_scanned: right_names.len(),
        },
        result,
    })
}

fn apply_overrides(config: &mut ParityConfig, args: &CompareArgs) -> parity::Result<()> {
    let extra = super::parse_aliases(&args.aliases)?;
    config.aliases.extend(extra);
    if args.no_fuzzy {
        config.fuzzy = false;
    }
    Ok(())
}

fn side_root(explicit: Option<&Path>, side: &SideConfig, name: &str) -> parity::Result<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| side.root.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            parity::Error::validation_missing_argument(vec![name.to_string()])
                .with_hint(format!("Pass the {} directory or set {}.root in the config", name, name))
        })
}
