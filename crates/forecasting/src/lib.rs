//! `stockwise-forecasting`
//!
//! **Responsibility:** demand forecasting and inventory optimization.
//!
//! The four components ([`demand`], [`reorder`], [`priority`], [`trend`]) are
//! pure functions of their inputs:
//! - no IO, no global clock (every entry point takes an explicit `as_of`),
//! - no global RNG (jitter comes from an injected [`JitterSource`]),
//! - no failure modes (empty history degrades to zeros).
//!
//! Around them sits the caller layer: tenant-scoped [`ForecastJob`]s, a
//! [`ForecastScheduler`], the [`HistoricalSeriesProvider`] boundary and the
//! [`ForecastService`] facade.

pub mod confidence;
pub mod demand;
pub mod demand_forecast;
pub mod error;
pub mod inventory_optimization;
pub mod jitter;
pub mod job;
pub mod params;
pub mod priority;
pub mod provider;
pub mod reorder;
pub mod sales_prediction;
pub mod scheduler;
pub mod series;
pub mod service;
pub mod trend;

pub use confidence::{ConfidenceBounds, decaying_confidence};
pub use demand::{DemandForecaster, ForecastPoint, forecast};
pub use demand_forecast::{DemandForecastJob, DemandForecastReport, ProductDemandInput};
pub use error::ForecastError;
pub use inventory_optimization::{InventoryInput, InventoryOptimizationJob, ProductHistory};
pub use jitter::{JitterSeed, JitterSource, Midpoint, SeededJitter};
pub use job::{ForecastJob, JobOptions};
pub use params::{ForecastParams, JitterRange};
pub use priority::{
    InventoryOptimization, LastSale, PriorityScorer, ProductActivity, ProductAnalysis, ProductStockSnapshot,
    recommended_order, score,
};
pub use provider::{HistoricalSeriesProvider, InMemorySeriesProvider};
pub use reorder::{Recommendation, ReorderCalculator, ReorderPlan, compute_reorder};
pub use sales_prediction::{CatalogRevenueInput, SalesPredictionJob, SalesPredictionReport};
pub use scheduler::{ForecastScheduler, LocalScheduler, TenantScope};
pub use series::{DailyPoint, DailySeries};
pub use service::ForecastService;
pub use trend::{RevenueTrendPoint, SalesTrendPredictor, Trend, TrendResult, predict_trend};
