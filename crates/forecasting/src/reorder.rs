//! Reorder point and safety stock.

use serde::{Deserialize, Serialize};

use crate::params::ForecastParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Reorder,
    Sufficient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPlan {
    pub reorder_point: u64,
    pub safety_stock: u64,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderCalculator {
    safety_stock_days: f64,
}

impl Default for ReorderCalculator {
    fn default() -> Self {
        Self::from_params(&ForecastParams::default())
    }
}

impl ReorderCalculator {
    pub fn from_params(params: &ForecastParams) -> Self {
        Self {
            safety_stock_days: params.safety_stock_days,
        }
    }

    /// Reorder when stock is at or below the lead-time demand plus safety stock.
    ///
    /// A negative or non-finite average is treated as no demand.
    pub fn compute(&self, avg_daily_demand: f64, current_stock: u64, lead_time_days: u32) -> ReorderPlan {
        let avg = if avg_daily_demand.is_finite() {
            avg_daily_demand.max(0.0)
        } else {
            0.0
        };

        let safety_stock = (avg * self.safety_stock_days).round();
        let reorder_point = (avg * f64::from(lead_time_days) + safety_stock).round();

        let safety_stock = safety_stock as u64;
        let reorder_point = reorder_point as u64;

        let recommendation = if current_stock <= reorder_point {
            Recommendation::Reorder
        } else {
            Recommendation::Sufficient
        };

        ReorderPlan {
            reorder_point,
            safety_stock,
            recommendation,
        }
    }
}

/// [`ReorderCalculator::compute`] with the default two-day safety buffer.
pub fn compute_reorder(avg_daily_demand: f64, current_stock: u64, lead_time_days: u32) -> ReorderPlan {
    ReorderCalculator::default().compute(avg_daily_demand, current_stock, lead_time_days)
}
