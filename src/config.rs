//! Configuration for zcalc.
//!
//! Loads `$XDG_CONFIG_HOME/zcalc/config.toml` with defaults for anything
//! missing.

use crate::calculator::{
    AngleUnit, DEFAULT_ERROR_TEXT, DEFAULT_HISTORY_LIMIT, EngineSettings, MAX_FACTORIAL,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of completed calculations kept in history.
    pub history_limit: usize,
    /// Text shown on the display after a failed operation.
    pub error_text: String,
    /// Largest number whose factorial may be taken.
    pub factorial_limit: u32,
    /// Unit for `sin`, `cos` and `tan` input.
    pub angle_unit: AngleUnit,
    /// Render results with thousands separators in the shell.
    pub group_digits: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            factorial_limit: MAX_FACTORIAL,
            angle_unit: AngleUnit::default(),
            group_digits: false,
        }
    }
}

impl Config {
    /// Default location of the config file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.error_text.trim().is_empty() {
            warn!(default = DEFAULT_ERROR_TEXT, "error_text must not be empty, using default");
            self.error_text = DEFAULT_ERROR_TEXT.to_string();
        }
        if self.history_limit == 0 {
            warn!("history_limit must be at least 1, using 1");
            self.history_limit = 1;
        }
        if self.factorial_limit > MAX_FACTORIAL {
            warn!(
                requested = self.factorial_limit,
                max = MAX_FACTORIAL,
                "factorial_limit too large for f64, clamping"
            );
            self.factorial_limit = MAX_FACTORIAL;
        }
        self
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            history_limit: self.history_limit,
            error_text: self.error_text.clone(),
            factorial_limit: self.factorial_limit,
            angle_unit: self.angle_unit,
        }
    }
}
