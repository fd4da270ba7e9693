// src/config.rs  —  Runtime configuration (CLI + TOML)
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The example config is embedded directly in the binary at compile time.
/// Users can write it out with:  loctable --write-config
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config.toml.example");

// ── CLI ───────────────────────────────────────────────────────────────────────
#[derive(Parser, Debug, Default)]
#[command(
    name        = "loctable",
    about       = "CSV localization table viewer with live language switching",
    version,
)]
pub struct Cli {
    /// Config file path (default: ~/.config/loctable/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the localization resource is resolved against
    #[arg(long)]
    pub resource_dir: Option<PathBuf>,

    /// Resource id inside the resource directory (".csv" may be omitted)
    #[arg(short, long)]
    pub resource: Option<String>,

    /// Field separator, a single character (default: ",")
    #[arg(long)]
    pub separator: Option<String>,

    /// Language to select at startup (a header name from the resource)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Select the language from LC_ALL / LC_MESSAGES / LANG instead of --lang
    #[arg(long, action)]
    pub system_lang: bool,

    /// List the languages in the resource and exit
    #[arg(long, action)]
    pub list_languages: bool,

    /// Print every key of the selected language as `key<TAB>text` and exit
    #[arg(long, action)]
    pub dump: bool,

    /// Append log output to this file (stderr is unusable while the TUI runs)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the built-in default config.toml to the config path and exit.
    /// Use --config <PATH> to write to a custom location.
    #[arg(long, action)]
    pub write_config: bool,

    /// Print the built-in default config.toml to stdout and exit
    #[arg(long, action)]
    pub print_config: bool,
}

// ── TOML file structure ───────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub localization: Option<LocalizationCfg>,
    pub ui:           Option<UiCfg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationCfg {
    pub resource_dir:        Option<PathBuf>,
    pub resource:            Option<String>,
    pub separator:           Option<String>,
    /// Selected at startup unless use_system_language is set
    pub default_language:    Option<String>,
    pub use_system_language: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiCfg {
    pub title: Option<String>,
}

// ── Resolved / merged config ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub resource_dir:        PathBuf,
    pub resource:            String,
    pub separator:           char,
    pub default_language:    String,
    pub use_system_language: bool,
    pub title:               String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resource_dir:        PathBuf::from("."),
            resource:            "localization".into(),
            separator:           crate::l10n::DEFAULT_SEPARATOR,
            default_language:    String::new(),
            use_system_language: false,
            title:               "Localization".into(),
        }
    }
}

// ── Config loader ─────────────────────────────────────────────────────────────
impl AppConfig {
    /// Write the embedded default config to disk.
    /// Returns the path it was written to.
    pub fn write_default_config(cli: &Cli) -> Result<PathBuf> {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating config directory {:?}", parent))?;
        }
        std::fs::write(&path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Writing config to {:?}", path))?;
        Ok(path)
    }

    pub fn load(cli: &Cli) -> Result<Self> {
        let mut cfg = Self::default();

        // 1. Load TOML file
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Reading config {:?}", path))?;
            let fc: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("Parsing config {:?}", path))?;
            cfg.apply_file(&fc)?;
        } else {
            log::info!("no config file at {}; using defaults", path.display());
        }

        // 2. Apply CLI overrides
        cfg.apply_cli(cli)?;
        Ok(cfg)
    }

    fn apply_file(&mut self, fc: &FileConfig) -> Result<()> {
        if let Some(l) = &fc.localization {
            if let Some(v) = &l.resource_dir        { self.resource_dir        = v.clone(); }
            if let Some(v) = &l.resource            { self.resource            = v.clone(); }
            if let Some(v) = &l.separator           { self.separator           = parse_separator(v)?; }
            if let Some(v) = &l.default_language    { self.default_language    = v.clone(); }
            if let Some(v) = l.use_system_language  { self.use_system_language = v; }
        }
        if let Some(u) = &fc.ui {
            if let Some(v) = &u.title { self.title = v.clone(); }
        }
        Ok(())
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(v) = &cli.resource_dir { self.resource_dir     = v.clone(); }
        if let Some(v) = &cli.resource     { self.resource         = v.clone(); }
        if let Some(v) = &cli.separator    { self.separator        = parse_separator(v)?; }
        if let Some(v) = &cli.lang {
            // An explicit --lang wins over a system-language setting from the file
            self.default_language    = v.clone();
            self.use_system_language = false;
        }
        if cli.system_lang                 { self.use_system_language = true; }
        Ok(())
    }
}

/// Separators are single characters; `\t` is accepted as an escape for tab.
pub fn parse_separator(raw: &str) -> Result<char> {
    if raw == "\\t" { return Ok('\t'); }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\n' && c != '\r' => Ok(c),
        _ => bail!("separator must be a single character, got {:?}", raw),
    }
}

fn default_config_path() -> PathBuf {
    dirs_next().join("loctable").join("config.toml")
}

fn dirs_next() -> PathBuf {
    if let Ok(v) = std::env::var("XDG_CONFIG_HOME") { return PathBuf::from(v); }
    if let Ok(v) = std::env::var("APPDATA")          { return PathBuf::from(v); }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_default();
    PathBuf::from(home).join(".config")
}
