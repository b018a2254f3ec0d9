//! `stockwise` — run a forecasting report against a dataset file.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use stockwise_cli::{CliConfig, Dataset};
use stockwise_core::ProductId;
use stockwise_forecasting::{ForecastService, JitterSeed};

/// Demand forecasting and inventory optimization reports
#[derive(Parser, Debug)]
#[command(name = "stockwise", version, about)]
struct Args {
    /// Dataset JSON (stock snapshots and daily series)
    #[arg(short, long)]
    data: PathBuf,

    /// TOML configuration file (falls back to STOCKWISE_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed jitter seed for reproducible output
    #[arg(long, conflicts_with = "no_jitter")]
    seed: Option<u64>,

    /// Disable jitter entirely
    #[arg(long)]
    no_jitter: bool,

    /// Evaluation time (RFC 3339); defaults to now
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Demand forecast and reorder plan for one product
    Demand {
        #[arg(short, long)]
        product_id: Option<ProductId>,
        #[arg(long)]
        horizon: Option<u32>,
    },
    /// Catalog revenue trend and projection
    Trend {
        #[arg(long)]
        horizon: Option<u32>,
    },
    /// Restock priority ranking of every product
    Optimize,
}

fn main() -> anyhow::Result<()> {
    stockwise_observability::init();

    let args = Args::parse();
    let config = CliConfig::load(args.config.as_deref())?;
    let dataset = Dataset::from_file(&args.data)?;
    let (tenant_id, provider) = dataset.into_provider()?;

    let seed = match (args.seed, args.no_jitter) {
        (_, true) => JitterSeed::Disabled,
        (Some(seed), false) => JitterSeed::Fixed(seed),
        (None, false) => JitterSeed::Fresh,
    };
    let as_of = args.as_of.unwrap_or_else(Utc::now);

    info!(
        tenant = %tenant_id,
        %as_of,
        seed = ?seed,
        history_days = config.history_days,
        lead_time_days = config.forecast.lead_time_days,
        "config_loaded"
    );

    let service = ForecastService::new(provider)
        .with_params(config.forecast)
        .with_seed(seed)
        .with_history_days(config.history_days);

    let output = match args.command {
        Command::Demand {
            product_id,
            horizon,
        } => serde_json::to_string_pretty(&service.demand_forecast(tenant_id, product_id, horizon, as_of)?),
        Command::Trend { horizon } => {
            serde_json::to_string_pretty(&service.sales_prediction(tenant_id, horizon, as_of)?)
        }
        Command::Optimize => serde_json::to_string_pretty(&service.inventory_optimization(tenant_id, as_of)?),
    }
    .context("failed to serialize report")?;

    println!("{output}");
    Ok(())
}
