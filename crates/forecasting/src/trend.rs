//! Catalog-wide revenue trend and forward revenue/order projection.
//!
//! Model:
//! - Compare the mean daily revenue of the recent window with the window before it.
//! - Project the recent mean forward, scaled by the growth rate, a one-cycle
//!   seasonal wave over the horizon, and jitter.
//! - Orders follow revenue at the recent revenue-per-order ratio.

use std::f64::consts::TAU;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::{ConfidenceBounds, decaying_confidence};
use crate::jitter::JitterSource;
use crate::params::{ForecastParams, JitterRange};
use crate::series::{DailySeries, mean_order_count, mean_revenue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Growing,
    Declining,
    Stable,
}

impl Trend {
    fn from_growth(growth_rate_pct: f64) -> Self {
        if growth_rate_pct > 0.0 {
            Trend::Growing
        } else if growth_rate_pct < 0.0 {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTrendPoint {
    pub date: NaiveDate,
    pub predicted_revenue: f64,
    pub predicted_orders: u64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub trend: Trend,
    pub growth_rate_pct: f64,
    /// Mean daily revenue of the recent window.
    pub average_daily_revenue: f64,
    pub predictions: Vec<RevenueTrendPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesTrendPredictor {
    window: usize,
    seasonal_amplitude: f64,
    jitter: JitterRange,
    confidence: ConfidenceBounds,
}

impl Default for SalesTrendPredictor {
    fn default() -> Self {
        Self::from_params(&ForecastParams::default())
    }
}

impl SalesTrendPredictor {
    pub fn from_params(params: &ForecastParams) -> Self {
        Self {
            window: params.trend_window,
            seasonal_amplitude: params.seasonal_amplitude,
            jitter: params.revenue_jitter,
            confidence: params.revenue_confidence,
        }
    }

    /// Projections stop early at the last representable calendar date.
    pub fn predict<J>(
        &self,
        series: &DailySeries,
        horizon_days: u32,
        as_of: DateTime<Utc>,
        jitter: &mut J,
    ) -> TrendResult
    where
        J: JitterSource + ?Sized,
    {
        let recent = series.trailing(self.window);
        let prior = series.window_before(self.window, self.window);

        let recent_avg = non_negative(mean_revenue(recent));
        let prior_avg = non_negative(mean_revenue(prior));
        let recent_orders = mean_order_count(recent);

        let growth_rate_pct = if prior_avg > 0.0 {
            (recent_avg - prior_avg) / prior_avg * 100.0
        } else {
            0.0
        };

        let today = as_of.date_naive();
        let growth = 1.0 + growth_rate_pct / 100.0;

        let predictions = (1..=horizon_days)
            .map_while(|step| {
                let date = today.checked_add_days(Days::new(u64::from(step)))?;
                let phase = f64::from(step) / f64::from(horizon_days) * TAU;
                let seasonal = 1.0 + phase.sin() * self.seasonal_amplitude;
                let factor = jitter.sample(self.jitter.low, self.jitter.high);

                let revenue = (recent_avg * growth * seasonal * factor).max(0.0);
                let predicted_revenue = round_cents(revenue);

                let predicted_orders = if recent_avg > 0.0 {
                    (predicted_revenue / recent_avg * recent_orders).round().max(0.0) as u64
                } else {
                    0
                };

                Some(RevenueTrendPoint {
                    date,
                    predicted_revenue,
                    predicted_orders,
                    confidence: decaying_confidence(step, horizon_days, self.confidence),
                })
            })
            .collect();

        TrendResult {
            trend: Trend::from_growth(growth_rate_pct),
            growth_rate_pct,
            average_daily_revenue: recent_avg,
            predictions,
        }
    }
}

/// [`SalesTrendPredictor::predict`] with the default parameters.
pub fn predict_trend<J>(
    series: &DailySeries,
    horizon_days: u32,
    as_of: DateTime<Utc>,
    jitter: &mut J,
) -> TrendResult
where
    J: JitterSource + ?Sized,
{
    SalesTrendPredictor::default().predict(series, horizon_days, as_of, jitter)
}

/// Negative or non-finite revenue counts as none.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::{Midpoint, SeededJitter};
    use crate::series::DailyPoint;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 28, 23, 59, 0).unwrap()
    }

    fn revenue_series(revenues: &[f64], orders: u64) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        revenues
            .iter()
            .enumerate()
            .map(|(i, r)| DailyPoint::new(start + Days::new(i as u64), 1, *r, orders))
            .collect()
    }

    fn prior_then_recent(prior: f64, recent: f64) -> DailySeries {
        let mut revenues = vec![prior; 14];
        revenues.extend(std::iter::repeat_n(recent, 14));
        revenue_series(&revenues, 4)
    }

    #[test]
    fn growing_revenue_reports_positive_growth() {
        let result = predict_trend(&prior_then_recent(100.0, 150.0), 7, as_of(), &mut Midpoint);
        assert_eq!(result.trend, Trend::Growing);
        assert!((result.growth_rate_pct - 50.0).abs() < 1e-9);
        assert_eq!(result.average_daily_revenue, 150.0);
    }

    #[test]
    fn declining_revenue_reports_negative_growth() {
        let result = predict_trend(&prior_then_recent(200.0, 150.0), 7, as_of(), &mut Midpoint);
        assert_eq!(result.trend, Trend::Declining);
        assert!((result.growth_rate_pct + 25.0).abs() < 1e-9);
    }

    #[test]
    fn short_series_is_stable_with_zero_growth() {
        let result = predict_trend(&revenue_series(&[80.0; 14], 2), 10, as_of(), &mut Midpoint);
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.growth_rate_pct, 0.0);
        assert_eq!(result.predictions.len(), 10);
    }

    #[test]
    fn partial_prior_window_is_still_compared() {
        let mut revenues = vec![50.0; 4];
        revenues.extend(std::iter::repeat_n(100.0, 14));
        let result = predict_trend(&revenue_series(&revenues, 1), 1, as_of(), &mut Midpoint);
        assert!((result.growth_rate_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn seasonal_wave_completes_one_cycle_over_the_horizon() {
        let series = prior_then_recent(100.0, 100.0);
        let result = predict_trend(&series, 4, as_of(), &mut Midpoint);
        let revenue: Vec<f64> = result.predictions.iter().map(|p| p.predicted_revenue).collect();
        // sin at quarter, half, three quarters and full cycle.
        assert_eq!(revenue, vec![110.0, 100.0, 90.0, 100.0]);
    }

    #[test]
    fn predicted_revenue_is_rounded_to_cents() {
        let series = prior_then_recent(33.333, 33.333);
        let result = predict_trend(&series, 4, as_of(), &mut Midpoint);
        assert_eq!(result.predictions[0].predicted_revenue, 36.67);
        assert_eq!(result.predictions[1].predicted_revenue, 33.33);
    }

    #[test]
    fn orders_follow_revenue_per_order_ratio() {
        let series = prior_then_recent(100.0, 100.0);
        let result = predict_trend(&series, 4, as_of(), &mut Midpoint);
        let orders: Vec<u64> = result.predictions.iter().map(|p| p.predicted_orders).collect();
        assert_eq!(orders, vec![4, 4, 4, 4]);
    }

    #[test]
    fn empty_series_projects_zero_revenue_and_orders() {
        let result = predict_trend(&DailySeries::default(), 5, as_of(), &mut SeededJitter::from_seed(5));
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.average_daily_revenue, 0.0);
        assert!(result.predictions.iter().all(|p| p.predicted_revenue == 0.0 && p.predicted_orders == 0));
    }

    #[test]
    fn projection_ends_at_last_representable_date() {
        let result = predict_trend(&prior_then_recent(1.0, 2.0), 5, DateTime::<Utc>::MAX_UTC, &mut Midpoint);
        assert!(result.predictions.is_empty());
        assert_eq!(result.trend, Trend::Growing);
    }

    #[test]
    fn negative_revenue_never_reaches_the_output() {
        let series = revenue_series(&[-500.0; 28], 2);
        let result = predict_trend(&series, 3, as_of(), &mut Midpoint);
        assert_eq!(result.average_daily_revenue, 0.0);
        assert_eq!(result.growth_rate_pct, 0.0);
        assert!(result.predictions.iter().all(|p| p.predicted_revenue == 0.0 && p.predicted_orders == 0));

        let nan = revenue_series(&[f64::NAN; 14], 2);
        assert_eq!(predict_trend(&nan, 1, as_of(), &mut Midpoint).average_daily_revenue, 0.0);
    }

    #[test]
    fn zero_horizon_has_no_predictions() {
        let result = predict_trend(&prior_then_recent(1.0, 2.0), 0, as_of(), &mut Midpoint);
        assert!(result.predictions.is_empty());
        assert_eq!(result.trend, Trend::Growing);
    }

    #[test]
    fn predictions_start_the_day_after_as_of() {
        let result = predict_trend(&prior_then_recent(1.0, 1.0), 2, as_of(), &mut Midpoint);
        assert_eq!(result.predictions[0].date.to_string(), "2024-02-29");
        assert_eq!(result.predictions[1].date.to_string(), "2024-03-01");
    }

    #[test]
    fn result_serializes_with_uppercase_trend() {
        let result = predict_trend(&DailySeries::default(), 0, as_of(), &mut Midpoint);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["trend"], "STABLE");
        assert!(json.get("growthRatePct").is_some());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: projections are never negative and confidence decays inside its bounds.
        #[test]
        fn projections_are_non_negative_and_bounded(
            revenues in prop::collection::vec(0.0f64..50_000.0, 0..90),
            horizon in 1u32..365,
            seed in any::<u64>()
        ) {
            let result = predict_trend(&revenue_series(&revenues, 3), horizon, as_of(), &mut SeededJitter::from_seed(seed));
            prop_assert_eq!(result.predictions.len(), horizon as usize);
            let mut previous = f64::INFINITY;
            for p in &result.predictions {
                prop_assert!(p.predicted_revenue >= 0.0);
                prop_assert!((0.6..=0.9).contains(&p.confidence));
                prop_assert!(p.confidence <= previous);
                previous = p.confidence;
            }
        }
    }
}
