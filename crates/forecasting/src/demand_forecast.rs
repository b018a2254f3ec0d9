use serde::{Deserialize, Serialize};
use tracing::debug;

use stockwise_core::{ProductId, TenantId};

use crate::demand::{DemandForecaster, ForecastPoint};
use crate::error::ForecastError;
use crate::job::{ForecastJob, JobOptions, ensure_tenant};
use crate::priority::ProductStockSnapshot;
use crate::reorder::{Recommendation, ReorderCalculator};
use crate::series::DailySeries;

/// Demand forecast for one product together with its reorder plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandForecastReport {
    pub product_id: ProductId,
    pub product_name: String,
    pub current_stock: u64,
    pub avg_daily_demand: f64,
    pub reorder_point: u64,
    pub safety_stock: u64,
    pub forecast: Vec<ForecastPoint>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDemandInput {
    pub tenant_id: TenantId,
    pub snapshot: ProductStockSnapshot,
    pub series: DailySeries,
}

#[derive(Debug, Clone)]
pub struct DemandForecastJob {
    tenant_id: TenantId,
    input: ProductDemandInput,
    options: JobOptions,
}

impl DemandForecastJob {
    pub fn new(tenant_id: TenantId, input: ProductDemandInput, options: JobOptions) -> Self {
        Self {
            tenant_id,
            input,
            options,
        }
    }
}

impl ForecastJob for DemandForecastJob {
    type Input = ProductDemandInput;
    type Output = DemandForecastReport;

    const KIND: &'static str = "inventory.demand_forecast";

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<DemandForecastReport, ForecastError> {
        ensure_tenant(self.tenant_id, self.input.tenant_id)?;
        let params = &self.options.params;
        params.validate()?;

        let snapshot = &self.input.snapshot;
        let forecaster = DemandForecaster::from_params(params);
        let avg_daily_demand = forecaster.average_daily_demand(&self.input.series);

        let mut jitter = self.options.seed.source();
        let forecast = forecaster.forecast(
            &self.input.series,
            self.options.horizon(),
            self.options.as_of,
            &mut *jitter,
        );

        let plan = ReorderCalculator::from_params(params).compute(
            avg_daily_demand,
            snapshot.current_stock,
            params.lead_time_days,
        );

        debug!(
            product = %snapshot.product_id,
            avg_daily_demand,
            reorder_point = plan.reorder_point,
            recommendation = ?plan.recommendation,
            "demand forecast computed"
        );

        Ok(DemandForecastReport {
            product_id: snapshot.product_id,
            product_name: snapshot.product_name.clone(),
            current_stock: snapshot.current_stock,
            avg_daily_demand,
            reorder_point: plan.reorder_point,
            safety_stock: plan.safety_stock,
            forecast,
            recommendation: plan.recommendation,
        })
    }
}
