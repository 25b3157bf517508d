// src/config/settings.rs
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use serde::{Serialize, Deserialize};

pub const ENV_PREFIX: &str = "FINCALC";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Reuse the history of an earlier run with the same id. When unset
    /// every launch gets a fresh session that is discarded on exit.
    pub session_id: Option<String>,
    pub storage_dir: PathBuf,
    pub export_dir: PathBuf,
    pub default_cvss_percentage: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_id: None,
            storage_dir: std::env::temp_dir().join("fincalc"),
            export_dir: dirs::document_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            default_cvss_percentage: 3.0,
        }
    }
}

impl Settings {
    /// Base name of the optional settings file; any format the `config`
    /// crate understands (`settings.ron`, `settings.toml`, ...) is accepted.
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fincalc").join("settings"))
    }

    /// Defaults, then the settings file, then `FINCALC_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_file().as_deref())
    }

    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(file) = file {
            builder = builder.add_source(
                ::config::File::with_name(&file.to_string_lossy()).required(false)
            );
        }

        let settings: Settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")?;

        Ok(settings.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.session_id.as_deref().map_or(false, |id| id.trim().is_empty()) {
            self.session_id = None;
        }
        if !self.default_cvss_percentage.is_finite() || self.default_cvss_percentage >= 100.0 {
            self.default_cvss_percentage = Settings::default().default_cvss_percentage;
        }
        self
    }

    pub fn default_percentage_text(&self) -> String {
        self.default_cvss_percentage.to_string()
    }
}
