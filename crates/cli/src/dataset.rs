//! JSON dataset consumed by the CLI.
//!
//! ```json
//! {
//!   "tenantId": "0190...",
//!   "products": [{"productId": "...", "productName": "...", "currentStock": 4}],
//!   "productSeries": {"<productId>": [{"date": "2024-01-01", "quantity": 3, "revenue": 45.0, "orderCount": 2}]},
//!   "catalogSeries": []
//! }
//! ```
//!
//! `catalogSeries` is optional; without it the catalog series is summed from
//! the product series.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use stockwise_core::{ProductId, TenantId};
use stockwise_forecasting::{DailySeries, InMemorySeriesProvider, ProductStockSnapshot};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub products: Vec<ProductStockSnapshot>,
    #[serde(default)]
    pub product_series: HashMap<ProductId, DailySeries>,
    #[serde(default)]
    pub catalog_series: Option<DailySeries>,
}

impl Dataset {
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let dataset: Dataset = serde_json::from_str(content).context("failed to parse dataset")?;
        dataset.check_series()?;
        Ok(dataset)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        Self::from_json_str(&content).with_context(|| format!("invalid dataset {}", path.display()))
    }

    /// Series must be ascending by date with finite, non-negative revenue.
    fn check_series(&self) -> anyhow::Result<()> {
        let named = self
            .product_series
            .iter()
            .map(|(id, s)| (id.to_string(), s))
            .chain(self.catalog_series.iter().map(|s| ("catalog".to_string(), s)));

        for (name, series) in named {
            let ordered = series.points().windows(2).all(|w| w[0].date < w[1].date);
            anyhow::ensure!(ordered, "series {name} is not strictly ascending by date");
            if let Some(bad) = series
                .points()
                .iter()
                .find(|p| !p.revenue.is_finite() || p.revenue < 0.0)
            {
                anyhow::bail!("series {name} has invalid revenue {} on {}", bad.revenue, bad.date);
            }
        }
        Ok(())
    }

    pub fn into_provider(self) -> anyhow::Result<(TenantId, InMemorySeriesProvider)> {
        let provider = InMemorySeriesProvider::new();
        let tenant_id = self.tenant_id;

        for snapshot in self.products {
            provider.upsert_product(tenant_id, snapshot)?;
        }
        for (product_id, series) in self.product_series {
            provider.set_product_series(tenant_id, product_id, series)?;
        }
        if let Some(series) = self.catalog_series {
            provider.set_catalog_series(tenant_id, series)?;
        }

        Ok((tenant_id, provider))
    }
}
