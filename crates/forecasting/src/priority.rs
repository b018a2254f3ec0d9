//! Restock urgency scoring and cross-product ranking.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockwise_core::ProductId;

use crate::params::ForecastParams;
use crate::series::DailySeries;

/// Highest possible priority.
pub const MAX_PRIORITY: u8 = 10;

/// Recency of a product's last sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum LastSale {
    /// No sale on record. Scores like a long-unsold product.
    Never,
    DaysAgo(u32),
}

impl LastSale {
    /// Whole days elapsed between `last_sale` and `as_of`; sales dated after
    /// `as_of` count as today.
    pub fn since(last_sale: Option<NaiveDate>, as_of: DateTime<Utc>) -> Self {
        match last_sale {
            None => LastSale::Never,
            Some(date) => {
                let days = (as_of.date_naive() - date).num_days().max(0);
                LastSale::DaysAgo(u32::try_from(days).unwrap_or(u32::MAX))
            }
        }
    }

    fn recency_points(self) -> i32 {
        match self {
            LastSale::Never => -2,
            LastSale::DaysAgo(d) if d < 7 => 2,
            LastSale::DaysAgo(d) if d > 30 => -2,
            LastSale::DaysAgo(_) => 0,
        }
    }
}

impl From<Option<u32>> for LastSale {
    fn from(days: Option<u32>) -> Self {
        days.map_or(LastSale::Never, LastSale::DaysAgo)
    }
}

impl From<LastSale> for Option<u32> {
    fn from(last_sale: LastSale) -> Self {
        match last_sale {
            LastSale::Never => None,
            LastSale::DaysAgo(d) => Some(d),
        }
    }
}

/// Current stock of one catalog product, as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStockSnapshot {
    pub product_id: ProductId,
    pub product_name: String,
    pub current_stock: u64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
}

/// Sales activity of one product over the velocity lookback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductActivity {
    /// Units sold over the lookback.
    pub sales_velocity: u64,
    pub order_count: u64,
    pub last_sale: LastSale,
}

impl ProductActivity {
    pub fn from_series(series: &DailySeries, as_of: DateTime<Utc>, lookback_days: u32) -> Self {
        let cutoff = as_of
            .date_naive()
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN);
        let window = series.since(cutoff);

        Self {
            sales_velocity: window.iter().map(|p| p.quantity).sum(),
            order_count: window.iter().map(|p| p.order_count).sum(),
            last_sale: LastSale::since(series.last_sale_date(), as_of),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    pub product_id: ProductId,
    pub product_name: String,
    pub current_stock: u64,
    pub sales_velocity: u64,
    pub order_count: u64,
    pub days_since_last_sale: LastSale,
    pub priority: u8,
    pub recommended_order: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOptimization {
    pub total_items: usize,
    pub critical_items: usize,
    pub product_analysis: Vec<ProductAnalysis>,
}

/// Restock priority in `[0, 10]`.
///
/// Sum of a stock-level, a velocity and a recency component, clamped.
pub fn score(current_stock: u64, sales_velocity: f64, last_sale: LastSale) -> u8 {
    let stock_points = match current_stock {
        0 => 10,
        1..=5 => 8,
        6..=10 => 5,
        _ => 0,
    };

    let velocity_points = if sales_velocity > 50.0 {
        3
    } else if sales_velocity > 20.0 {
        2
    } else if sales_velocity > 5.0 {
        1
    } else {
        0
    };

    let total: i32 = stock_points + velocity_points + last_sale.recency_points();
    total.clamp(0, i32::from(MAX_PRIORITY)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityScorer {
    coverage_days: f64,
    safety_ratio: f64,
    critical_priority: u8,
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::from_params(&ForecastParams::default())
    }
}

impl PriorityScorer {
    pub fn from_params(params: &ForecastParams) -> Self {
        Self {
            coverage_days: params.order_coverage_days,
            safety_ratio: params.order_safety_ratio,
            critical_priority: params.critical_priority,
        }
    }

    pub fn score(&self, current_stock: u64, sales_velocity: f64, last_sale: LastSale) -> u8 {
        score(current_stock, sales_velocity, last_sale)
    }

    /// Units to order so stock covers the coverage period plus safety.
    ///
    /// No observed demand means no restock signal.
    pub fn recommended_order(&self, current_stock: u64, sales_velocity: f64) -> u64 {
        if !(sales_velocity.is_finite() && sales_velocity > 0.0) {
            return 0;
        }
        let demand = sales_velocity * self.coverage_days;
        let safety = (demand * self.safety_ratio).round();
        (demand + safety - current_stock as f64).round().max(0.0) as u64
    }

    pub fn is_critical(&self, priority: u8) -> bool {
        priority >= self.critical_priority
    }

    pub fn analyze(&self, snapshot: &ProductStockSnapshot, activity: ProductActivity) -> ProductAnalysis {
        let velocity = activity.sales_velocity as f64;
        ProductAnalysis {
            product_id: snapshot.product_id,
            product_name: snapshot.product_name.clone(),
            current_stock: snapshot.current_stock,
            sales_velocity: activity.sales_velocity,
            order_count: activity.order_count,
            days_since_last_sale: activity.last_sale,
            priority: self.score(snapshot.current_stock, velocity, activity.last_sale),
            recommended_order: self.recommended_order(snapshot.current_stock, velocity),
        }
    }

    /// Analyze every product and order them by descending priority.
    ///
    /// Products with equal priority keep their input order.
    pub fn rank<'a, I>(&self, products: I) -> InventoryOptimization
    where
        I: IntoIterator<Item = (&'a ProductStockSnapshot, ProductActivity)>,
    {
        let mut product_analysis: Vec<ProductAnalysis> = products
            .into_iter()
            .map(|(snapshot, activity)| self.analyze(snapshot, activity))
            .collect();

        product_analysis.sort_by(|a, b| b.priority.cmp(&a.priority));

        let critical_items = product_analysis
            .iter()
            .filter(|a| self.is_critical(a.priority))
            .count();

        InventoryOptimization {
            total_items: product_analysis.len(),
            critical_items,
            product_analysis,
        }
    }
}

/// [`PriorityScorer::recommended_order`] with a 30-day coverage and 20% safety.
pub fn recommended_order(current_stock: u64, sales_velocity: f64) -> u64 {
    PriorityScorer::default().recommended_order(current_stock, sales_velocity)
}
