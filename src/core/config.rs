//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.kurs/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::currency::Currency;
use crate::rates::providers::frankfurter::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KursConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub frankfurter: FrankfurterConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_amount: Option<f64>,
    pub default_from: Option<Currency>,
    pub default_to: Option<Currency>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FrankfurterConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_AMOUNT: f64 = 100.0;
pub const DEFAULT_FROM: Currency = Currency::Eur;
pub const DEFAULT_TO: Currency = Currency::Usd;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
    pub base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.kurs/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".kurs").join("config.toml"))
}

/// Load config from `~/.kurs/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `KursConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<KursConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(KursConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(KursConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: KursConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# kurs Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_amount = 100
# default_from = "EUR"                 # one of USD, EUR, CAD, INR
# default_to = "USD"

# [frankfurter]
# base_url = "https://api.frankfurter.app"   # Or set FRANKFURTER_BASE_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// CLI flag values that participate in resolution (None = not specified).
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub amount: Option<f64>,
    pub from: Option<Currency>,
    pub to: Option<Currency>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &KursConfig, cli: CliOverrides) -> ResolvedConfig {
    // Base URL: env → config → default
    let base_url = std::env::var("FRANKFURTER_BASE_URL")
        .ok()
        .or_else(|| config.frankfurter.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        amount: cli
            .amount
            .or(config.general.default_amount)
            .unwrap_or(DEFAULT_AMOUNT),
        from: cli
            .from
            .or(config.general.default_from)
            .unwrap_or(DEFAULT_FROM),
        to: cli.to.or(config.general.default_to).unwrap_or(DEFAULT_TO),
        base_url,
    }
}
