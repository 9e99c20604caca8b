//! Run configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! command-line flags and `PARETO_*` environment variables.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Everything a pipeline run needs, passed explicitly to each handler
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite URL of the sales database
    pub database_url: String,
    /// Sales spreadsheet to import
    pub input: PathBuf,
    /// Where the Pareto report is written
    pub pareto_output: PathBuf,
    /// Where the top products report is written
    pub top_products_output: PathBuf,
    /// Share of total sales the top products report must reach
    pub target_percent: f64,
    /// Embed a line chart in the Pareto report
    pub pareto_chart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://ventes.db".to_string(),
            input: PathBuf::from("VENTES.xlsx"),
            pareto_output: PathBuf::from("ParetoChart.xlsx"),
            top_products_output: PathBuf::from("TopProducts.xlsx"),
            target_percent: 0.8,
            pareto_chart: true,
        }
    }
}

impl Config {
    /// Load a config file, falling back to defaults for missing keys
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Build the effective configuration from the command line
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&mut self, args: &GlobalArgs) {
        if let Some(url) = &args.database_url {
            self.database_url = url.clone();
        }
        if let Some(input) = &args.input {
            self.input = input.clone();
        }
        if let Some(path) = &args.pareto_output {
            self.pareto_output = path.clone();
        }
        if let Some(path) = &args.top_output {
            self.top_products_output = path.clone();
        }
        if let Some(target) = args.target_percent {
            self.target_percent = target;
        }
        if args.no_chart {
            self.pareto_chart = false;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            bail!("Database URL must not be empty");
        }
        if !self.target_percent.is_finite() {
            bail!("Target percent must be a finite number, got {}", self.target_percent);
        }
        if self.target_percent <= 0.0 || self.target_percent > 1.0 {
            log::warn!(
                "Target percent {} is outside (0, 1]; the top products report may be degenerate",
                self.target_percent
            );
        }
        Ok(())
    }
}
