//! Dashboard configuration, read from the environment.

use crate::error::{DashboardError, Result};
use crate::report::GroupingPolicy;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_ENV: &str = "DASHBOARD_DATA";
pub const OUTPUT_ENV: &str = "DASHBOARD_OUTPUT";
pub const KEEP_NULL_KEYS_ENV: &str = "DASHBOARD_KEEP_NULL_KEYS";

const DEFAULT_DATA_PATH: &str = "cleaned_data.xlsx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Title followed by a text table per panel
    #[default]
    Table,
    /// JSON array of `{chart, rows}` objects
    Json,
}

impl FromStr for OutputFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(DashboardError::Config(format!(
                "{} must be 'table' or 'json', got '{}'",
                OUTPUT_ENV, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub output: OutputFormat,
    pub drop_null_keys: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output: OutputFormat::Table,
            drop_null_keys: GroupingPolicy::default().drop_null_keys,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_ENV).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(output) = lookup(OUTPUT_ENV) {
            config.output = output.parse()?;
        }
        if let Some(keep) = lookup(KEEP_NULL_KEYS_ENV) {
            config.drop_null_keys = !parse_flag(KEEP_NULL_KEYS_ENV, &keep)?;
        }

        Ok(config)
    }

    pub fn grouping_policy(&self) -> GroupingPolicy {
        GroupingPolicy {
            drop_null_keys: self.drop_null_keys,
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DashboardError::Config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
