//! Historical series provider boundary.
//!
//! Raw sale and product records live outside the engine. Providers hand the
//! engine already-aggregated daily series and current stock, scoped by tenant.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;

use stockwise_core::{ProductId, TenantId};

use crate::error::ForecastError;
use crate::priority::ProductStockSnapshot;
use crate::series::{DailyPoint, DailySeries};

/// Tenant-scoped source of aggregated history and stock levels.
pub trait HistoricalSeriesProvider: Send + Sync {
    /// Daily series of one product, dated on or after `since`.
    fn product_series(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
        since: NaiveDate,
    ) -> Result<DailySeries, ForecastError>;

    /// Daily series of the whole catalog, dated on or after `since`.
    fn catalog_series(&self, tenant_id: TenantId, since: NaiveDate) -> Result<DailySeries, ForecastError>;

    fn stock_snapshot(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
    ) -> Result<Option<ProductStockSnapshot>, ForecastError>;

    /// All products of the tenant, in a stable order.
    fn stock_snapshots(&self, tenant_id: TenantId) -> Result<Vec<ProductStockSnapshot>, ForecastError>;
}

impl<P> HistoricalSeriesProvider for Arc<P>
where
    P: HistoricalSeriesProvider + ?Sized,
{
    fn product_series(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
        since: NaiveDate,
    ) -> Result<DailySeries, ForecastError> {
        (**self).product_series(tenant_id, product_id, since)
    }

    fn catalog_series(&self, tenant_id: TenantId, since: NaiveDate) -> Result<DailySeries, ForecastError> {
        (**self).catalog_series(tenant_id, since)
    }

    fn stock_snapshot(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
    ) -> Result<Option<ProductStockSnapshot>, ForecastError> {
        (**self).stock_snapshot(tenant_id, product_id)
    }

    fn stock_snapshots(&self, tenant_id: TenantId) -> Result<Vec<ProductStockSnapshot>, ForecastError> {
        (**self).stock_snapshots(tenant_id)
    }
}

#[derive(Debug, Default, Clone)]
struct TenantHistory {
    /// Insertion order is the listing order.
    products: Vec<ProductStockSnapshot>,
    product_series: HashMap<ProductId, DailySeries>,
    catalog_series: Option<DailySeries>,
}

/// In-memory provider for tests/dev and file-driven runs.
///
/// When no catalog series was stored for a tenant, the catalog series is the
/// per-day sum of its product series.
#[derive(Debug, Default)]
pub struct InMemorySeriesProvider {
    inner: RwLock<HashMap<TenantId, TenantHistory>>,
}

impl InMemorySeriesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product's stock snapshot.
    pub fn upsert_product(&self, tenant_id: TenantId, snapshot: ProductStockSnapshot) -> Result<(), ForecastError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let history = map.entry(tenant_id).or_default();
        match history
            .products
            .iter_mut()
            .find(|p| p.product_id == snapshot.product_id)
        {
            Some(existing) => *existing = snapshot,
            None => history.products.push(snapshot),
        }
        Ok(())
    }

    pub fn set_product_series(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
        series: DailySeries,
    ) -> Result<(), ForecastError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.entry(tenant_id)
            .or_default()
            .product_series
            .insert(product_id, series);
        Ok(())
    }

    pub fn set_catalog_series(&self, tenant_id: TenantId, series: DailySeries) -> Result<(), ForecastError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.entry(tenant_id).or_default().catalog_series = Some(series);
        Ok(())
    }

    fn read<T>(&self, tenant_id: TenantId, f: impl FnOnce(&TenantHistory) -> T) -> Result<Option<T>, ForecastError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&tenant_id).map(f))
    }
}

impl HistoricalSeriesProvider for InMemorySeriesProvider {
    fn product_series(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
        since: NaiveDate,
    ) -> Result<DailySeries, ForecastError> {
        let series = self.read(tenant_id, |h| {
            h.product_series
                .get(&product_id)
                .map(|s| DailySeries::new(s.since(since).to_vec()))
        })?;
        Ok(series.flatten().unwrap_or_default())
    }

    fn catalog_series(&self, tenant_id: TenantId, since: NaiveDate) -> Result<DailySeries, ForecastError> {
        let series = self.read(tenant_id, |h| match &h.catalog_series {
            Some(s) => DailySeries::new(s.since(since).to_vec()),
            None => sum_by_day(h.product_series.values(), since),
        })?;
        Ok(series.unwrap_or_default())
    }

    fn stock_snapshot(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
    ) -> Result<Option<ProductStockSnapshot>, ForecastError> {
        let snapshot = self.read(tenant_id, |h| {
            h.products.iter().find(|p| p.product_id == product_id).cloned()
        })?;
        Ok(snapshot.flatten())
    }

    fn stock_snapshots(&self, tenant_id: TenantId) -> Result<Vec<ProductStockSnapshot>, ForecastError> {
        let snapshots = self.read(tenant_id, |h| h.products.clone())?;
        Ok(snapshots.unwrap_or_default())
    }
}

fn sum_by_day<'a>(series: impl Iterator<Item = &'a DailySeries>, since: NaiveDate) -> DailySeries {
    let mut days: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();
    for s in series {
        for p in s.since(since) {
            let day = days
                .entry(p.date)
                .or_insert_with(|| DailyPoint::new(p.date, 0, 0.0, 0));
            day.quantity += p.quantity;
            day.revenue += p.revenue;
            day.order_count += p.order_count;
        }
    }
    days.into_values().collect()
}

fn poisoned() -> ForecastError {
    ForecastError::Provider("in-memory provider lock poisoned".to_string())
}
