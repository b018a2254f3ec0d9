//! Configuration loading.
//!
//! Config file is selected via:
//! 1. `--config <path>` command line argument
//! 2. `STOCKWISE_CONFIG` environment variable
//! 3. none: built-in defaults
//!
//! `STOCKWISE_LEAD_TIME_DAYS` overrides the lead time from either source.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use stockwise_forecasting::ForecastParams;
use stockwise_forecasting::params::MAX_HISTORY_DAYS;
use stockwise_forecasting::service::DEFAULT_HISTORY_DAYS;

pub const CONFIG_ENV: &str = "STOCKWISE_CONFIG";
pub const LEAD_TIME_ENV: &str = "STOCKWISE_LEAD_TIME_DAYS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Days of history fetched for forecasts.
    pub history_days: u32,
    pub forecast: ForecastParams,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            history_days: DEFAULT_HISTORY_DAYS,
            forecast: ForecastParams::default(),
        }
    }
}

impl CliConfig {
    /// Explicit path first, then the environment.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: CliConfig = toml::from_str(content).context("failed to parse config")?;
        anyhow::ensure!(
            (1..=MAX_HISTORY_DAYS).contains(&config.history_days),
            "history_days must be within 1..={MAX_HISTORY_DAYS}"
        );
        config.forecast.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load from the resolved path (or defaults) and apply env overrides.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match Self::resolve_path(explicit) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_lead_time_override(env::var(LEAD_TIME_ENV).ok().as_deref());
        Ok(config)
    }

    fn apply_lead_time_override(&mut self, raw: Option<&str>) {
        let Some(raw) = raw else {
            return;
        };
        match raw.trim().parse::<u32>() {
            Ok(days) if days > 0 => self.forecast.lead_time_days = days,
            _ => warn!(
                value = raw,
                lead_time_days = self.forecast.lead_time_days,
                "{LEAD_TIME_ENV} is not a positive integer; keeping configured lead time"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(CliConfig::from_toml_str("").unwrap(), CliConfig::default());
    }

    #[test]
    fn nested_forecast_table_overrides_selected_fields() {
        let config = CliConfig::from_toml_str(
            r#"
            history_days = 120

            [forecast]
            lead_time_days = 14
            seasonal_amplitude = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.history_days, 120);
        assert_eq!(config.forecast.lead_time_days, 14);
        assert_eq!(config.forecast.seasonal_amplitude, 0.0);
        assert_eq!(config.forecast.demand_window, 7);
    }

    #[test]
    fn invalid_params_fail_to_load() {
        let err = CliConfig::from_toml_str("[forecast]\ntrend_window = 0\n").unwrap_err();
        assert!(format!("{err:#}").contains("trend_window"));
    }

    #[test]
    fn history_days_must_fit_the_calendar() {
        for raw in ["history_days = 0", "history_days = 4294967295"] {
            let err = CliConfig::from_toml_str(raw).unwrap_err();
            assert!(err.to_string().contains("history_days"), "{raw}: {err:#}");
        }
        let config = CliConfig::from_toml_str(&format!("history_days = {MAX_HISTORY_DAYS}")).unwrap();
        assert_eq!(config.history_days, MAX_HISTORY_DAYS);
    }

    #[test]
    fn lead_time_override_accepts_positive_integers_only() {
        let mut config = CliConfig::default();
        config.apply_lead_time_override(Some("12"));
        assert_eq!(config.forecast.lead_time_days, 12);

        config.apply_lead_time_override(Some("0"));
        config.apply_lead_time_override(Some("soon"));
        assert_eq!(config.forecast.lead_time_days, 12);
    }

    #[test]
    fn explicit_path_wins_over_environment() {
        let path = Path::new("/tmp/stockwise.toml");
        assert_eq!(CliConfig::resolve_path(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = CliConfig::from_file("/nonexistent/stockwise.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/stockwise.toml"));
    }
}
