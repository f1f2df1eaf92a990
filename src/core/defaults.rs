use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::parity::{AliasTable, NamingConvention, StripRule};
use crate::utils::io;

/// Config file names picked up from the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["parity.json", "parity.toml"];

pub const DEFAULT_PRESET: &str = "winforms-avalonia";

/// Root configuration structure for parity.json / parity.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParityConfig {
    /// Run the substring fallback pass.
    #[serde(default = "default_fuzzy")]
    pub fuzzy: bool,

    #[serde(default = "default_left")]
    pub left: SideConfig,

    #[serde(default = "default_right")]
    pub right: SideConfig,

    #[serde(default = "default_aliases")]
    pub aliases: AliasTable,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            left: default_left(),
            right: default_right(),
            aliases: default_aliases(),
            fuzzy: default_fuzzy(),
        }
    }
}

/// One side of the comparison: where its files live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SideFile", into = "SideFile")]
pub struct SideConfig {
    pub convention: NamingConvention,

    /// Directory walked when none is given on the command line.
    pub root: Option<String>,

    /// Glob patterns for directory names that are not descended into.
    pub skip_dirs: Vec<String>,
}

/// On-disk shape of a side: the convention's fields sit next to `root`.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SideFile {
    label: String,
    rules: Vec<StripRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root: Option<String>,
    #[serde(default = "default_skip_dirs")]
    skip_dirs: Vec<String>,
}

impl From<SideFile> for SideConfig {
    fn from(file: SideFile) -> Self {
        Self {
            convention: NamingConvention::new(file.label, file.rules),
            root: file.root,
            skip_dirs: file.skip_dirs,
        }
    }
}

impl From<SideConfig> for SideFile {
    fn from(side: SideConfig) -> Self {
        Self {
            label: side.convention.label,
            rules: side.convention.rules,
            root: side.root,
            skip_dirs: side.skip_dirs,
        }
    }
}

// =============================================================================
// Default value functions (the WinForms -> Avalonia migration preset)
// =============================================================================

fn default_left() -> SideConfig {
    SideConfig {
        convention: NamingConvention::new(
            "WinForms",
            vec![StripRule::affix(Some("SAV_"), ".cs").excluding(".Designer.cs")],
        ),
        root: Some("PKHeX.WinForms/Subforms".to_string()),
        skip_dirs: default_skip_dirs(),
    }
}

fn default_right() -> SideConfig {
    SideConfig {
        convention: NamingConvention::new(
            "Avalonia",
            vec![
                StripRule::affix(None, "EditorViewModel.cs").appending("Ed"),
                StripRule::affix(None, "ViewerViewModel.cs").appending("Viewer"),
                StripRule::affix(None, "ListViewModel.cs").appending("List"),
                StripRule::exact("MysteryGiftDatabaseViewModel.cs", "MysteryGiftDatabase"),
            ],
        ),
        root: Some("PKHeX.Avalonia/ViewModels".to_string()),
        skip_dirs: default_skip_dirs(),
    }
}

fn default_skip_dirs() -> Vec<String> {
    vec![
        "bin".to_string(),
        "obj".to_string(),
        ".git".to_string(),
        ".vs".to_string(),
        "node_modules".to_string(),
    ]
}

fn default_fuzzy() -> bool {
    true
}

fn default_aliases() -> AliasTable {
    [
        ("BerryFieldXY", "BerryFieldEd"),
        ("BlockDump8", "BlockEd"),
        ("BoxViewer", "BoxViewer"),
        ("Donut9a", "DonutEd"),
        ("FlagWork8b", "EventFlagsEd"),
        ("FlagWork9a", "EventFlagsEd"),
        ("FolderList", "FolderList"),
        ("GroupViewer", "GroupViewer"),
        ("MysteryGiftDB", "MysteryGiftDatabase"),
        ("PokeBlockORAS", "PokeBlockEd"),
        ("Pokedex9a", "PokedexGen9Ed"),
        ("PokedexBDSP", "Pokedex8bEd"),
        ("PokedexGG", "Pokedex7bEd"),
        ("PokedexORAS", "Pokedex6Ed"),
        ("PokedexResearchEditorLA", "PokedexLAEd"),
        ("PokedexSM", "Pokedex7Ed"),
        ("PokedexSV", "PokedexGen9Ed"),
        ("PokedexSVKitakami", "PokedexGen9Ed"),
        ("PokedexSWSH", "Pokedex8Ed"),
        ("PokedexXY", "Pokedex6Ed"),
        ("Raid8", "RaidEd"),
        ("SimplePokedex", "PokedexSimpleEd"),
        ("Trainer4BR", "GearBREd"),
        ("Trainer7", "TrainerEd"),
        ("Trainer7GG", "TrainerEd"),
        ("Trainer8", "TrainerEd"),
        ("Trainer8a", "TrainerEd"),
        ("Trainer8b", "TrainerEd"),
        ("Trainer9", "TrainerEd"),
        ("Trainer9a", "TrainerEd"),
        ("Wondercard", "MysteryGiftEd"),
    ]
    .into_iter()
    .collect()
}

/// An empty configuration: no rules, no aliases.
fn blank_config() -> ParityConfig {
    let side = |label: &str| SideConfig {
        convention: NamingConvention::new(label, Vec::new()),
        root: None,
        skip_dirs: default_skip_dirs(),
    };

    ParityConfig {
        left: side("left"),
        right: side("right"),
        aliases: AliasTable::new(),
        fuzzy: default_fuzzy(),
    }
}

// =============================================================================
// Presets
// =============================================================================

pub fn preset_names() -> Vec<String> {
    vec![DEFAULT_PRESET.to_string(), "blank".to_string()]
}

/// Built-in configuration by name.
pub fn preset(name: &str) -> Result<ParityConfig> {
    match name {
        DEFAULT_PRESET => Ok(ParityConfig::default()),
        "blank" => Ok(blank_config()),
        other => Err(Error::preset_not_found(other, preset_names())),
    }
}

// =============================================================================
// Loading functions
// =============================================================================

/// Locate a config file in `dir`, if any.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Effective configuration plus the file it came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ParityConfig,
    pub path: Option<PathBuf>,
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. Without one, the named preset applies; with
/// neither, a config file in the working directory is used when present,
/// otherwise the default preset.
pub fn load_config(path: Option<&Path>, preset_name: Option<&str>) -> Result<ParityConfig> {
    resolve_config(path, preset_name).map(|loaded| loaded.config)
}

/// Like [`load_config`], but also reports which file was read.
pub fn resolve_config(path: Option<&Path>, preset_name: Option<&str>) -> Result<LoadedConfig> {
    if let Some(path) = path {
        return Ok(LoadedConfig {
            config: load_config_from_file(path)?,
            path: Some(path.to_path_buf()),
        });
    }

    if let Some(name) = preset_name {
        return Ok(LoadedConfig {
            config: preset(name)?,
            path: None,
        });
    }

    let cwd = std::env::current_dir().map_err(|e| {
        Error::internal_io(e.to_string(), Some("resolve working directory".to_string()))
    })?;
    resolve_in_dir(&cwd)
}

/// Use the config file discovered in `dir`, or the default preset.
pub fn resolve_in_dir(dir: &Path) -> Result<LoadedConfig> {
    match discover_config(dir) {
        Some(found) => {
            log_status!("config", "Using {}", found.display());
            Ok(LoadedConfig {
                config: load_config_from_file(&found)?,
                path: Some(found),
            })
        }
        None => Ok(LoadedConfig {
            config: preset(DEFAULT_PRESET)?,
            path: None,
        }),
    }
}

/// Parse a JSON or TOML config file, chosen by extension.
pub fn load_config_from_file(path: &Path) -> Result<ParityConfig> {
    let display = path.display().to_string();
    let content = io::read_file(path, &format!("read {}", display))?;

    let config: ParityConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => {
            toml::from_str(&content).map_err(|e| Error::config_invalid_toml(&display, e))?
        }
        _ => serde_json::from_str(&content).map_err(|e| Error::config_invalid_json(&display, e))?,
    };

    validate(&config)?;
    Ok(config)
}

/// Serialize a configuration in the format implied by `path`'s extension.
pub fn render_config(config: &ParityConfig, path: &Path) -> Result<String> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::to_string(config).map_err(|e| {
            Error::internal_unexpected(format!("serialize {}: {}", path.display(), e))
        }),
        _ => serde_json::to_string_pretty(config).map_err(|e| {
            Error::internal_json(e.to_string(), Some(format!("serialize {}", path.display())))
        }),
    }
}

/// Write `config` to `path`, refusing to replace an existing file unless `force`.
pub fn save_config(config: &ParityConfig, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("{} already exists", path.display()),
            None,
            None,
        )
        .with_hint("Pass --force to overwrite it"));
    }

    let content = render_config(config, path)?;
    io::write_file_atomic(path, &content, &format!("write {}", path.display()))
}

/// Reject rules that could never produce a sensible token.
pub fn validate(config: &ParityConfig) -> Result<()> {
    for (side, cfg) in [("left", &config.left), ("right", &config.right)] {
        if cfg.convention.label.trim().is_empty() {
            return Err(Error::config_invalid_value(
                format!("{}.label", side),
                None,
                "Convention label must not be empty",
            ));
        }

        for (index, rule) in cfg.convention.rules.iter().enumerate() {
            let key = format!("{}.rules[{}]", side, index);
            match rule {
                StripRule::Exact(rule) => {
                    if rule.file_name.is_empty() || rule.token.is_empty() {
                        return Err(Error::config_invalid_value(
                            key,
                            Some(rule.file_name.clone()),
                            "Exact rules need both file_name and token",
                        ));
                    }
                }
                StripRule::Affix(rule) => {
                    let has_prefix = rule.prefix.as_deref().is_some_and(|p| !p.is_empty());
                    if rule.suffix.is_empty() && !has_prefix {
                        return Err(Error::config_invalid_value(
                            key,
                            None,
                            "Affix rules need a prefix or a non-empty suffix",
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}
