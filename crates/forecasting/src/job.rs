use chrono::{DateTime, Utc};
use serde::Serialize;

use stockwise_core::TenantId;

use crate::error::ForecastError;
use crate::jitter::JitterSeed;
use crate::params::ForecastParams;

/// A tenant-scoped forecasting unit.
///
/// Jobs consume inputs already fetched by the caller (see
/// [`HistoricalSeriesProvider`](crate::provider::HistoricalSeriesProvider));
/// running a job performs no IO and mutates nothing.
pub trait ForecastJob: Send + Sync + 'static {
    type Input: Send + Sync + 'static;
    type Output: Serialize + Send + 'static;

    /// Stable name used in logs.
    const KIND: &'static str;

    /// The tenant this job belongs to (tenant-safe execution model).
    fn tenant_id(&self) -> TenantId;

    /// The input snapshot the job will run on.
    fn input(&self) -> &Self::Input;

    fn run(&self) -> Result<Self::Output, ForecastError>;
}

/// Per-run settings shared by every job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOptions {
    pub as_of: DateTime<Utc>,
    /// Forecast horizon; `None` uses `params.default_horizon_days`.
    pub horizon_days: Option<u32>,
    pub seed: JitterSeed,
    pub params: ForecastParams,
}

impl JobOptions {
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            as_of,
            horizon_days: None,
            seed: JitterSeed::default(),
            params: ForecastParams::default(),
        }
    }

    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = Some(horizon_days);
        self
    }

    pub fn with_seed(mut self, seed: JitterSeed) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_params(mut self, params: ForecastParams) -> Self {
        self.params = params;
        self
    }

    pub fn horizon(&self) -> u32 {
        self.horizon_days.unwrap_or(self.params.default_horizon_days)
    }
}

pub(crate) fn ensure_tenant(job_tenant: TenantId, input_tenant: TenantId) -> Result<(), ForecastError> {
    if job_tenant != input_tenant {
        return Err(ForecastError::InvalidInput(
            "tenant_id mismatch between job and input".to_string(),
        ));
    }
    Ok(())
}
