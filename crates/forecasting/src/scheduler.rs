use std::time::{Duration, Instant};

use tracing::{debug, warn};

use stockwise_core::TenantId;

use crate::error::ForecastError;
use crate::job::ForecastJob;

/// Tenant scope for execution.
///
/// - `Any`: run jobs for any tenant (useful for shared workers).
/// - `Tenant`: only accept jobs for the specified tenant (single-tenant worker).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TenantScope {
    Any,
    Tenant(TenantId),
}

impl TenantScope {
    pub fn allows(&self, tenant_id: TenantId) -> bool {
        match self {
            TenantScope::Any => true,
            TenantScope::Tenant(t) => *t == tenant_id,
        }
    }
}

/// Executor for forecasting jobs.
pub trait ForecastScheduler: Send + Sync + 'static {
    fn scope(&self) -> TenantScope;

    fn run<J: ForecastJob>(&self, job: J) -> Result<J::Output, ForecastError> {
        let tenant_id = job.tenant_id();
        if !self.scope().allows(tenant_id) {
            warn!(job = J::KIND, tenant = %tenant_id, "job rejected by tenant scope");
            return Err(ForecastError::TenantScopeViolation(tenant_id));
        }

        let started = Instant::now();
        let result = job.run();
        let elapsed_us = micros(started.elapsed());

        match &result {
            Ok(_) => debug!(job = J::KIND, tenant = %tenant_id, elapsed_us, "job finished"),
            Err(e) => warn!(job = J::KIND, tenant = %tenant_id, elapsed_us, error = %e, "job failed"),
        }
        result
    }
}

/// Whole microseconds, saturating at `u64::MAX`.
fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Synchronous scheduler that runs jobs immediately in-process.
#[derive(Debug, Copy, Clone)]
pub struct LocalScheduler {
    scope: TenantScope,
}

impl LocalScheduler {
    pub fn new(scope: TenantScope) -> Self {
        Self { scope }
    }

    pub fn for_tenant(tenant_id: TenantId) -> Self {
        Self::new(TenantScope::Tenant(tenant_id))
    }
}

impl Default for LocalScheduler {
    fn default() -> Self {
        Self::new(TenantScope::Any)
    }
}

impl ForecastScheduler for LocalScheduler {
    fn scope(&self) -> TenantScope {
        self.scope
    }
}
