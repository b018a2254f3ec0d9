//! `stockwise-cli` — file-driven front end for the forecasting service.
//!
//! Loads a dataset (stock snapshots plus daily series) and an optional TOML
//! config, runs one report and prints it as JSON.

pub mod config;
pub mod dataset;

pub use config::CliConfig;
pub use dataset::Dataset;
