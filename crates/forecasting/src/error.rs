use thiserror::Error;

use stockwise_core::{ProductId, TenantId};

/// Failures of the caller-side forecasting layer (jobs, scheduler, service).
///
/// The pure forecasting components never fail; these errors come from request
/// validation, tenant scoping and the series provider.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("product id is required")]
    MissingProductId,

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("tenant scope violation (job tenant {0} not allowed by scheduler)")]
    TenantScopeViolation(TenantId),

    #[error("invalid job input: {0}")]
    InvalidInput(String),

    #[error("invalid forecast parameters: {0}")]
    InvalidParams(String),

    #[error("series provider failed: {0}")]
    Provider(String),
}
