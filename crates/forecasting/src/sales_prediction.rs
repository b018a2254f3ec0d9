use serde::{Deserialize, Serialize};
use tracing::debug;

use stockwise_core::TenantId;

use crate::error::ForecastError;
use crate::job::{ForecastJob, JobOptions, ensure_tenant};
use crate::series::DailySeries;
use crate::trend::{RevenueTrendPoint, SalesTrendPredictor, Trend};

/// Catalog-wide revenue trend and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPredictionReport {
    pub current_trend: Trend,
    /// Recent-vs-prior revenue growth, in percent.
    pub growth_rate: f64,
    pub average_daily_revenue: f64,
    pub predictions: Vec<RevenueTrendPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRevenueInput {
    pub tenant_id: TenantId,
    pub series: DailySeries,
}

#[derive(Debug, Clone)]
pub struct SalesPredictionJob {
    tenant_id: TenantId,
    input: CatalogRevenueInput,
    options: JobOptions,
}

impl SalesPredictionJob {
    pub fn new(tenant_id: TenantId, input: CatalogRevenueInput, options: JobOptions) -> Self {
        Self {
            tenant_id,
            input,
            options,
        }
    }
}

impl ForecastJob for SalesPredictionJob {
    type Input = CatalogRevenueInput;
    type Output = SalesPredictionReport;

    const KIND: &'static str = "sales.trend_prediction";

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<SalesPredictionReport, ForecastError> {
        ensure_tenant(self.tenant_id, self.input.tenant_id)?;
        let params = &self.options.params;
        params.validate()?;

        let mut jitter = self.options.seed.source();
        let result = SalesTrendPredictor::from_params(params).predict(
            &self.input.series,
            self.options.horizon(),
            self.options.as_of,
            &mut *jitter,
        );

        debug!(
            points = self.input.series.len(),
            trend = ?result.trend,
            growth_rate_pct = result.growth_rate_pct,
            "sales trend computed"
        );

        Ok(SalesPredictionReport {
            current_trend: result.trend,
            growth_rate: result.growth_rate_pct,
            average_daily_revenue: result.average_daily_revenue,
            predictions: result.predictions,
        })
    }
}
