//! Per-product demand forecast.
//!
//! Model:
//! - Average the trailing window of daily quantities (0 when there is no history).
//! - Step `i` of the horizon predicts `avg * (1 + i * drift) * jitter`.
//! - Confidence decays linearly with the step, inside the demand bounds.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::{ConfidenceBounds, decaying_confidence};
use crate::jitter::JitterSource;
use crate::params::{ForecastParams, JitterRange};
use crate::series::{DailySeries, mean_quantity};

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_demand: u64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemandForecaster {
    window: usize,
    drift: f64,
    jitter: JitterRange,
    confidence: ConfidenceBounds,
}

impl Default for DemandForecaster {
    fn default() -> Self {
        Self::from_params(&ForecastParams::default())
    }
}

impl DemandForecaster {
    pub fn from_params(params: &ForecastParams) -> Self {
        Self {
            window: params.demand_window,
            drift: params.trend_drift,
            jitter: params.demand_jitter,
            confidence: params.demand_confidence,
        }
    }

    /// Mean daily quantity over the trailing window.
    pub fn average_daily_demand(&self, series: &DailySeries) -> f64 {
        mean_quantity(series.trailing(self.window))
    }

    /// Forecast `horizon_days` consecutive days starting the day after `as_of`.
    ///
    /// The forecast stops early at the last representable calendar date.
    pub fn forecast<J>(
        &self,
        series: &DailySeries,
        horizon_days: u32,
        as_of: DateTime<Utc>,
        jitter: &mut J,
    ) -> Vec<ForecastPoint>
    where
        J: JitterSource + ?Sized,
    {
        let avg = self.average_daily_demand(series);
        self.project(avg, horizon_days, as_of.date_naive(), jitter)
    }

    fn project<J>(
        &self,
        avg: f64,
        horizon_days: u32,
        today: NaiveDate,
        jitter: &mut J,
    ) -> Vec<ForecastPoint>
    where
        J: JitterSource + ?Sized,
    {
        (1..=horizon_days)
            .map_while(|step| {
                let date = today.checked_add_days(Days::new(u64::from(step)))?;
                let trend = 1.0 + step as f64 * self.drift;
                let factor = jitter.sample(self.jitter.low, self.jitter.high);
                let predicted = (avg * trend * factor).max(0.0).round();

                Some(ForecastPoint {
                    date,
                    predicted_demand: predicted as u64,
                    confidence: decaying_confidence(step, horizon_days, self.confidence),
                })
            })
            .collect()
    }
}

/// [`DemandForecaster::forecast`] with the default parameters.
pub fn forecast<J>(
    series: &DailySeries,
    horizon_days: u32,
    as_of: DateTime<Utc>,
    jitter: &mut J,
) -> Vec<ForecastPoint>
where
    J: JitterSource + ?Sized,
{
    DemandForecaster::default().forecast(series, horizon_days, as_of, jitter)
}
