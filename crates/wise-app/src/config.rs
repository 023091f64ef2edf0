//! Configuration management for wise-routes
//!
//! Config stored at: ~/.config/wise-routes/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wise_domain::service::SimulatorSettings;
use wise_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Trip sheet (CSV)
    #[serde(default)]
    pub trips_csv: Option<PathBuf>,

    /// Maintenance sheet (CSV)
    #[serde(default)]
    pub maintenance_csv: Option<PathBuf>,

    /// Combined dataset bundle (TOML)
    #[serde(default)]
    pub dataset_toml: Option<PathBuf>,

    /// Route simulator constants
    #[serde(default)]
    pub simulator: SimulatorSettings,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            trips_csv: None,
            maintenance_csv: None,
            dataset_toml: None,
            simulator: SimulatorSettings::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("wise-routes");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, or create default when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.simulator.validate()?;
        Ok(())
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Wise Routes Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(f, "Trips CSV:        {}", display_path(&self.trips_csv))?;
        writeln!(f, "Maintenance CSV:  {}", display_path(&self.maintenance_csv))?;
        writeln!(f, "Dataset TOML:     {}", display_path(&self.dataset_toml))?;
        writeln!(f)?;
        writeln!(f, "Simulator")?;
        let sim = &self.simulator;
        writeln!(f, "  Diesel price:      R$ {:.2} / L", sim.diesel_price)?;
        writeln!(f, "  Average speed:     {:.0} km/h", sim.average_speed_kmh)?;
        writeln!(f, "  Default km/L:      {:.2}", sim.default_efficiency)?;
        writeln!(f, "  Emission factor:   {:.2} kg CO2 / L", sim.emission_factor)?;
        writeln!(
            f,
            "  Distance range:    {}..={} km",
            sim.min_distance_km, sim.max_distance_km
        )?;
        writeln!(f, "  High risk chance:  {:.0}%", sim.high_risk_probability * 100.0)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}
