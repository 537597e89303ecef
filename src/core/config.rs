//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.folio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::content::{ContentError, PortfolioContent};
use crate::core::rotator::{
    DEFAULT_DELETE_INTERVAL, DEFAULT_PAUSE, DEFAULT_TYPE_INTERVAL, TypewriterTiming,
};
use crate::inference::providers::DEFAULT_GEMINI_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub typewriter: TypewriterConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub system_prompt_file: Option<String>,
    pub content_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TypewriterConfig {
    pub type_interval_ms: Option<u64>,
    pub delete_interval_ms: Option<u64>,
    pub pause_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI portfolio assistant for Ziyi Wang, an AI Engineer and Full-Stack Developer. \
    Style: brief, technical, professional, yet slightly \"cyberpunk\" in tone. \
    Knowledge: Ziyi works across computer vision, deep learning, serverless AI products and modern web stacks. \
    Do not answer questions unrelated to coding, design, or Ziyi.";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub system_prompt: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub content_file: Option<PathBuf>,
    pub timing: TypewriterTiming,
}

/// Values supplied on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub model: Option<String>,
    pub content: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Content(ContentError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Content(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.folio`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".folio"))
}

/// Returns the path to `~/.folio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.folio/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FolioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FolioConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FolioConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FolioConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<FolioConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Debug view of the config with the API key masked.
fn redacted(config: &FolioConfig) -> String {
    format!(
        "general={:?} gemini.base_url={:?} gemini.api_key={} typewriter={:?}",
        config.general,
        config.gemini.base_url,
        if config.gemini.api_key.is_some() { "<set>" } else { "<unset>" },
        config.typewriter,
    )
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Folio Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# model = "gemini-2.5-flash"
# system_prompt = "You are an AI portfolio assistant."
# system_prompt_file = "persona.md"   # Path relative to ~/.folio/
# content_file = "content.toml"       # Path relative to ~/.folio/

# [gemini]
# api_key = "..."                     # Or set GEMINI_API_KEY (or API_KEY)
# base_url = "https://generativelanguage.googleapis.com/v1beta"

# [typewriter]
# type_interval_ms = 80
# delete_interval_ms = 40
# pause_ms = 3000
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config from the process environment.
pub fn resolve(config: &FolioConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `env` looks up an environment variable; tests pass a fixed table.
pub fn resolve_with<F>(config: &FolioConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Model: CLI → env → config → default
    let model_name = cli
        .model
        .clone()
        .or_else(|| env("FOLIO_MODEL"))
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let system_prompt = resolve_system_prompt(config);

    // API key: GEMINI_API_KEY → API_KEY → config
    let gemini_api_key = env("GEMINI_API_KEY")
        .or_else(|| env("API_KEY"))
        .or_else(|| config.gemini.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    let gemini_base_url = env("GEMINI_BASE_URL")
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    // Content file: CLI path as given, config path relative to ~/.folio/
    let content_file = cli.content.clone().or_else(|| {
        config.general.content_file.as_ref().map(|file| {
            let path = PathBuf::from(file);
            match config_dir() {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            }
        })
    });

    let tw = &config.typewriter;
    let timing = TypewriterTiming {
        type_interval: tw
            .type_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TYPE_INTERVAL),
        delete_interval: tw
            .delete_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DELETE_INTERVAL),
        pause: tw.pause_ms.map(Duration::from_millis).unwrap_or(DEFAULT_PAUSE),
    };
    if !deletes_faster_than_types(&timing) {
        warn!(
            "typewriter delete interval ({:?}) is not shorter than type interval ({:?})",
            timing.delete_interval, timing.type_interval
        );
    }

    ResolvedConfig {
        model_name,
        system_prompt,
        gemini_api_key,
        gemini_base_url,
        content_file,
        timing,
    }
}

/// The role line erases faster than it types.
fn deletes_faster_than_types(timing: &TypewriterTiming) -> bool {
    timing.delete_interval < timing.type_interval
}

/// Resolves the system prompt: inline wins over file, both win over default.
fn resolve_system_prompt(config: &FolioConfig) -> String {
    if let Some(ref prompt) = config.general.system_prompt {
        return prompt.clone();
    }

    if let Some(ref file) = config.general.system_prompt_file {
        if let Some(dir) = config_dir() {
            let prompt_path = dir.join(file);
            match fs::read_to_string(&prompt_path) {
                Ok(contents) => {
                    let trimmed = contents.trim().to_string();
                    if !trimmed.is_empty() {
                        info!("Loaded system prompt from {}", prompt_path.display());
                        return trimmed;
                    }
                    warn!("System prompt file is empty: {}", prompt_path.display());
                }
                Err(e) => {
                    warn!(
                        "Failed to read system prompt file {}: {}",
                        prompt_path.display(),
                        e
                    );
                }
            }
        }
    }

    DEFAULT_SYSTEM_PROMPT.to_string()
}

/// Loads the portfolio content: the override file when configured, otherwise
/// the built-in content.
pub fn load_content(resolved: &ResolvedConfig) -> Result<PortfolioContent, ConfigError> {
    match &resolved.content_file {
        Some(path) => PortfolioContent::load(path).map_err(ConfigError::Content),
        None => Ok(PortfolioContent::default()),
    }
}
