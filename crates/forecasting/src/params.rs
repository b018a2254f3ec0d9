//! Tunable constants of the forecasting engine.
//!
//! The defaults reproduce the production behavior. The trend drift and the
//! seasonal amplitude have no business derivation behind them; they are
//! parameters, not law.

use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceBounds;
use crate::error::ForecastError;

/// Closed range `[low, high]` used for jitter draws.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct JitterRange {
    pub low: f64,
    pub high: f64,
}

impl JitterRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && 0.0 <= self.low && self.low <= self.high
    }
}

/// Longest history window (in days) a lookback may span.
pub const MAX_HISTORY_DAYS: u32 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParams {
    /// Trailing points averaged into the daily demand rate.
    pub demand_window: usize,
    /// Per-step upward drift applied to the demand forecast (`1 + i * drift`).
    pub trend_drift: f64,
    pub demand_jitter: JitterRange,
    pub demand_confidence: ConfidenceBounds,

    /// Size of the recent and of the prior revenue window.
    pub trend_window: usize,
    /// Amplitude of the one-cycle seasonal wave over the horizon.
    pub seasonal_amplitude: f64,
    pub revenue_jitter: JitterRange,
    pub revenue_confidence: ConfidenceBounds,

    pub lead_time_days: u32,
    /// Days of average demand held as safety stock.
    pub safety_stock_days: f64,

    /// Days of history counted into sales velocity and order count.
    pub velocity_lookback_days: u32,
    /// Days of demand a recommended order should cover.
    pub order_coverage_days: f64,
    /// Extra share of the covered demand added as safety.
    pub order_safety_ratio: f64,
    /// Priority at or above which a product counts as critical.
    pub critical_priority: u8,

    pub default_horizon_days: u32,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            demand_window: 7,
            trend_drift: 0.01,
            demand_jitter: JitterRange::new(0.8, 1.2),
            demand_confidence: ConfidenceBounds::DEMAND,
            trend_window: 14,
            seasonal_amplitude: 0.1,
            revenue_jitter: JitterRange::new(0.9, 1.1),
            revenue_confidence: ConfidenceBounds::REVENUE,
            lead_time_days: 7,
            safety_stock_days: 2.0,
            velocity_lookback_days: 30,
            order_coverage_days: 30.0,
            order_safety_ratio: 0.2,
            critical_priority: 8,
            default_horizon_days: 30,
        }
    }
}

impl ForecastParams {
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.demand_window == 0 {
            return Err(invalid("demand_window must be >= 1"));
        }
        if self.trend_window == 0 {
            return Err(invalid("trend_window must be >= 1"));
        }
        if self.lead_time_days == 0 {
            return Err(invalid("lead_time_days must be >= 1"));
        }
        if !(1..=MAX_HISTORY_DAYS).contains(&self.velocity_lookback_days) {
            return Err(invalid(format!(
                "velocity_lookback_days must be within 1..={MAX_HISTORY_DAYS}"
            )));
        }
        if !self.demand_jitter.is_valid() {
            return Err(invalid("demand_jitter must be a finite, non-negative, ordered range"));
        }
        if !self.revenue_jitter.is_valid() {
            return Err(invalid("revenue_jitter must be a finite, non-negative, ordered range"));
        }
        if !self.demand_confidence.is_valid() || !self.revenue_confidence.is_valid() {
            return Err(invalid("confidence bounds must satisfy 0 <= lower <= upper <= 1"));
        }
        let non_negative = [
            ("trend_drift", self.trend_drift),
            ("seasonal_amplitude", self.seasonal_amplitude),
            ("safety_stock_days", self.safety_stock_days),
            ("order_coverage_days", self.order_coverage_days),
            ("order_safety_ratio", self.order_safety_ratio),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{name} must be a finite non-negative number")));
            }
        }
        if self.critical_priority > 10 {
            return Err(invalid("critical_priority must be within 0..=10"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ForecastError {
    ForecastError::InvalidParams(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ForecastParams::default().validate().unwrap();
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let params: ForecastParams = serde_json::from_str(r#"{"lead_time_days": 14}"#).unwrap();
        assert_eq!(params.lead_time_days, 14);
        assert_eq!(params.demand_window, 7);
        assert_eq!(params.seasonal_amplitude, 0.1);
    }

    #[test]
    fn inverted_jitter_range_is_rejected() {
        let params = ForecastParams {
            demand_jitter: JitterRange::new(1.2, 0.8),
            ..ForecastParams::default()
        };
        assert!(matches!(params.validate(), Err(ForecastError::InvalidParams(_))));
    }

    #[test]
    fn zero_lead_time_is_rejected() {
        let params = ForecastParams {
            lead_time_days: 0,
            ..ForecastParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn lookback_beyond_history_limit_is_rejected() {
        let params = ForecastParams {
            velocity_lookback_days: u32::MAX,
            ..ForecastParams::default()
        };
        assert!(matches!(params.validate(), Err(ForecastError::InvalidParams(_))));

        let params = ForecastParams {
            velocity_lookback_days: MAX_HISTORY_DAYS,
            ..ForecastParams::default()
        };
        params.validate().unwrap();
    }

    #[test]
    fn nan_drift_is_rejected() {
        let params = ForecastParams {
            trend_drift: f64::NAN,
            ..ForecastParams::default()
        };
        assert!(params.validate().is_err());
    }
}
