// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

fn default_daily_folder() -> String {
    "discord".to_string()
}
fn default_backlog_path() -> String {
    "discord/BACKLOG.md".to_string()
}

fn default_work_tag() -> String {
    "#work".to_string()
}
fn default_personal_tag() -> String {
    "#personal".to_string()
}
fn default_waiting_tag() -> String {
    "#waiting".to_string()
}

fn default_due_soon_days() -> u32 {
    7
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    /// All format names joined with `|`, for help and error messages.
    pub fn choices() -> String {
        OutputFormat::iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        OutputFormat::iter()
            .find(|f| f.to_string() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown output format '{}' (expected {})",
                    s,
                    Self::choices()
                )
            })
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Root directory of the vault. Overridden by `--vault`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_path: Option<PathBuf>,
    #[serde(default = "default_daily_folder")]
    pub daily_folder: String,
    #[serde(default = "default_backlog_path")]
    pub backlog_path: String,

    #[serde(default = "default_work_tag")]
    pub work_tag: String,
    #[serde(default = "default_personal_tag")]
    pub personal_tag: String,
    #[serde(default = "default_waiting_tag")]
    pub waiting_tag: String,

    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: u32,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_path: None,
            // Match the serde defaults
            daily_folder: default_daily_folder(),
            backlog_path: default_backlog_path(),
            work_tag: default_work_tag(),
            personal_tag: default_personal_tag(),
            waiting_tag: default_waiting_tag(),
            due_soon_days: default_due_soon_days(),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Detects whether an error means the config file was missing, either by
    /// our explicit message or an `io::ErrorKind::NotFound` anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
