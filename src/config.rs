//! User configuration (`config.toml`).
//!
//! ```toml
//! rows = 10
//! cols = 10
//! column_width = 12
//! ```
//!
//! Problems with the file never stop startup: they are returned as warnings
//! and the defaults are used instead.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MIN_COLUMN_WIDTH: usize = 3;
const MAX_COLUMN_WIDTH: usize = 50;

/// Startup settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Initial number of rows.
    pub rows: usize,
    /// Initial number of columns.
    pub cols: usize,
    /// Display width of each column in the TUI.
    pub column_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: 10,
            cols: 10,
            column_width: 12,
        }
    }
}

impl Config {
    /// Parse and validate TOML config text.
    pub fn from_toml(content: &str) -> Result<Config, String> {
        let config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rows == 0 || self.cols == 0 {
            return Err(format!(
                "rows and cols must be positive (got {}x{})",
                self.rows, self.cols
            ));
        }
        if !(MIN_COLUMN_WIDTH..=MAX_COLUMN_WIDTH).contains(&self.column_width) {
            return Err(format!(
                "column_width must be between {} and {} (got {})",
                MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH, self.column_width
            ));
        }
        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellpad")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Config::from_toml(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Load the config from `config_file`, or from the user config dir when none
/// is given. Returns the config and any warnings to show the user.
pub fn load_config(config_file: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    match read_config(&path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), ?config, "loaded config");
            (config, warnings)
        }
        Err(warning) => {
            warnings.push(warning);
            (Config::default(), warnings)
        }
    }
}
