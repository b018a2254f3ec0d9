//! Request-level entry points.
//!
//! The service fetches history from a [`HistoricalSeriesProvider`], builds the
//! matching job and runs it through a [`ForecastScheduler`]. This is the layer an
//! HTTP handler calls.

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::info;

use stockwise_core::{ProductId, TenantId};

use crate::demand_forecast::{DemandForecastJob, DemandForecastReport, ProductDemandInput};
use crate::error::ForecastError;
use crate::inventory_optimization::{InventoryInput, InventoryOptimizationJob, ProductHistory};
use crate::jitter::JitterSeed;
use crate::job::JobOptions;
use crate::params::ForecastParams;
use crate::priority::InventoryOptimization;
use crate::provider::HistoricalSeriesProvider;
use crate::sales_prediction::{CatalogRevenueInput, SalesPredictionJob, SalesPredictionReport};
use crate::scheduler::{ForecastScheduler, LocalScheduler};

/// Days of history fetched for per-product and catalog forecasts.
pub const DEFAULT_HISTORY_DAYS: u32 = 90;

pub struct ForecastService<P, S = LocalScheduler> {
    provider: P,
    scheduler: S,
    params: ForecastParams,
    seed: JitterSeed,
    history_days: u32,
}

impl<P: HistoricalSeriesProvider> ForecastService<P, LocalScheduler> {
    pub fn new(provider: P) -> Self {
        Self::with_scheduler(provider, LocalScheduler::default())
    }
}

impl<P, S> ForecastService<P, S>
where
    P: HistoricalSeriesProvider,
    S: ForecastScheduler,
{
    pub fn with_scheduler(provider: P, scheduler: S) -> Self {
        Self {
            provider,
            scheduler,
            params: ForecastParams::default(),
            seed: JitterSeed::Fresh,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }

    pub fn with_params(mut self, params: ForecastParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_seed(mut self, seed: JitterSeed) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_history_days(mut self, history_days: u32) -> Self {
        self.history_days = history_days;
        self
    }

    pub fn params(&self) -> &ForecastParams {
        &self.params
    }

    fn options(&self, as_of: DateTime<Utc>, horizon_days: Option<u32>) -> JobOptions {
        let options = JobOptions::new(as_of)
            .with_seed(self.seed)
            .with_params(self.params.clone());
        match horizon_days {
            Some(h) => options.with_horizon(h),
            None => options,
        }
    }

    fn history_start(&self, as_of: DateTime<Utc>, days: u32) -> NaiveDate {
        as_of
            .date_naive()
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Demand forecast and reorder plan for one product.
    pub fn demand_forecast(
        &self,
        tenant_id: TenantId,
        product_id: Option<ProductId>,
        horizon_days: Option<u32>,
        as_of: DateTime<Utc>,
    ) -> Result<DemandForecastReport, ForecastError> {
        let product_id = product_id.ok_or(ForecastError::MissingProductId)?;
        let snapshot = self
            .provider
            .stock_snapshot(tenant_id, product_id)?
            .ok_or(ForecastError::ProductNotFound(product_id))?;
        let series = self.provider.product_series(
            tenant_id,
            product_id,
            self.history_start(as_of, self.history_days),
        )?;

        info!(tenant = %tenant_id, product = %product_id, points = series.len(), "demand forecast requested");

        let job = DemandForecastJob::new(
            tenant_id,
            ProductDemandInput {
                tenant_id,
                snapshot,
                series,
            },
            self.options(as_of, horizon_days),
        );
        self.scheduler.run(job)
    }

    /// Catalog-wide revenue trend and projection.
    pub fn sales_prediction(
        &self,
        tenant_id: TenantId,
        horizon_days: Option<u32>,
        as_of: DateTime<Utc>,
    ) -> Result<SalesPredictionReport, ForecastError> {
        let series = self
            .provider
            .catalog_series(tenant_id, self.history_start(as_of, self.history_days))?;

        info!(tenant = %tenant_id, points = series.len(), "sales prediction requested");

        let job = SalesPredictionJob::new(
            tenant_id,
            CatalogRevenueInput { tenant_id, series },
            self.options(as_of, horizon_days),
        );
        self.scheduler.run(job)
    }

    /// Restock ranking of every product of the tenant.
    ///
    /// Fetches each product's full history: a sale older than the velocity
    /// lookback still sets the product's last-sale recency.
    pub fn inventory_optimization(
        &self,
        tenant_id: TenantId,
        as_of: DateTime<Utc>,
    ) -> Result<InventoryOptimization, ForecastError> {
        let since = NaiveDate::MIN;
        let products = self
            .provider
            .stock_snapshots(tenant_id)?
            .into_iter()
            .map(|snapshot| {
                let series = self
                    .provider
                    .product_series(tenant_id, snapshot.product_id, since)?;
                Ok(ProductHistory { snapshot, series })
            })
            .collect::<Result<Vec<_>, ForecastError>>()?;

        info!(tenant = %tenant_id, products = products.len(), "inventory optimization requested");

        let job = InventoryOptimizationJob::new(
            tenant_id,
            InventoryInput {
                tenant_id,
                products,
            },
            self.options(as_of, None),
        );
        self.scheduler.run(job)
    }
}
