use tracing::debug;

use stockwise_core::TenantId;

use crate::error::ForecastError;
use crate::job::{ForecastJob, JobOptions, ensure_tenant};
use crate::priority::{InventoryOptimization, PriorityScorer, ProductActivity, ProductStockSnapshot};
use crate::series::DailySeries;

/// One product's stock and sales history.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductHistory {
    pub snapshot: ProductStockSnapshot,
    pub series: DailySeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryInput {
    pub tenant_id: TenantId,
    pub products: Vec<ProductHistory>,
}

/// Ranks every product of a tenant by restock urgency.
#[derive(Debug, Clone)]
pub struct InventoryOptimizationJob {
    tenant_id: TenantId,
    input: InventoryInput,
    options: JobOptions,
}

impl InventoryOptimizationJob {
    pub fn new(tenant_id: TenantId, input: InventoryInput, options: JobOptions) -> Self {
        Self {
            tenant_id,
            input,
            options,
        }
    }
}

impl ForecastJob for InventoryOptimizationJob {
    type Input = InventoryInput;
    type Output = InventoryOptimization;

    const KIND: &'static str = "inventory.optimization";

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<InventoryOptimization, ForecastError> {
        ensure_tenant(self.tenant_id, self.input.tenant_id)?;
        let params = &self.options.params;
        params.validate()?;

        let as_of = self.options.as_of;
        let lookback = params.velocity_lookback_days;
        let result = PriorityScorer::from_params(params).rank(self.input.products.iter().map(|p| {
            (
                &p.snapshot,
                ProductActivity::from_series(&p.series, as_of, lookback),
            )
        }));

        debug!(
            total_items = result.total_items,
            critical_items = result.critical_items,
            "inventory optimization computed"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::LastSale;
    use crate::series::DailyPoint;
    use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
    use stockwise_core::ProductId;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 31, 18, 0, 0).unwrap()
    }

    fn product(name: &str, stock: u64, daily_sales: &[(u32, u64)]) -> ProductHistory {
        ProductHistory {
            snapshot: ProductStockSnapshot {
                product_id: ProductId::new(),
                product_name: name.to_string(),
                current_stock: stock,
                category_name: None,
                supplier_name: None,
            },
            series: daily_sales
                .iter()
                .map(|(d, q)| {
                    let date = NaiveDate::from_ymd_opt(2024, 10, *d).unwrap();
                    DailyPoint::new(date, *q, *q as f64 * 3.0, 1)
                })
                .collect(),
        }
    }

    #[test]
    fn ranks_products_by_urgency() {
        let tenant = TenantId::new();
        let input = InventoryInput {
            tenant_id: tenant,
            products: vec![
                product("idle", 40, &[]),
                product("hot", 0, &[(28, 30), (29, 25), (30, 10)]),
                product("slow", 8, &[(2, 1)]),
            ],
        };

        let result = InventoryOptimizationJob::new(tenant, input, JobOptions::new(as_of()))
            .run()
            .unwrap();

        let hot = &result.product_analysis[0];
        assert_eq!(hot.product_name, "hot");
        assert_eq!(hot.priority, 10);
        assert_eq!(hot.sales_velocity, 65);
        assert_eq!(hot.order_count, 3);
        assert_eq!(hot.days_since_last_sale, LastSale::DaysAgo(1));
        // 65 * 30 = 1950, safety 390.
        assert_eq!(hot.recommended_order, 2340);

        let slow = &result.product_analysis[1];
        assert_eq!(slow.product_name, "slow");
        assert_eq!(slow.priority, 5);

        let idle = &result.product_analysis[2];
        assert_eq!(idle.days_since_last_sale, LastSale::Never);
        assert_eq!(idle.priority, 0);
        assert_eq!(idle.recommended_order, 0);

        assert_eq!(result.total_items, 3);
        assert_eq!(result.critical_items, 1);
    }

    #[test]
    fn sales_before_the_lookback_do_not_count_toward_velocity() {
        let tenant = TenantId::new();
        let mut old = product("old", 3, &[]);
        old.series = vec![DailyPoint::new(
            as_of().date_naive() - Days::new(45),
            500,
            1_000.0,
            10,
        )]
        .into();

        let result = InventoryOptimizationJob::new(
            tenant,
            InventoryInput {
                tenant_id: tenant,
                products: vec![old],
            },
            JobOptions::new(as_of()),
        )
        .run()
        .unwrap();

        let analysis = &result.product_analysis[0];
        assert_eq!(analysis.sales_velocity, 0);
        assert_eq!(analysis.days_since_last_sale, LastSale::DaysAgo(45));
        // stock 3 -> 8, long unsold -> -2
        assert_eq!(analysis.priority, 6);
    }

    #[test]
    fn serializes_never_sold_as_null() {
        let tenant = TenantId::new();
        let result = InventoryOptimizationJob::new(
            tenant,
            InventoryInput {
                tenant_id: tenant,
                products: vec![product("new", 0, &[])],
            },
            JobOptions::new(as_of()),
        )
        .run()
        .unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["criticalItems"], 1);
        assert!(json["productAnalysis"][0]["daysSinceLastSale"].is_null());
    }
}
