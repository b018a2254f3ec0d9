//! Aggregated daily sales series.
//!
//! Series are produced outside the engine (already aggregated per day) and are
//! treated as immutable input. Points are ascending by date; the engine never
//! synthesizes missing days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of aggregated sales activity for a product or the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub quantity: u64,
    pub revenue: f64,
    #[serde(default)]
    pub order_count: u64,
}

impl DailyPoint {
    pub fn new(date: NaiveDate, quantity: u64, revenue: f64, order_count: u64) -> Self {
        Self {
            date,
            quantity,
            revenue,
            order_count,
        }
    }
}

/// Date-ordered sequence of [`DailyPoint`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries(Vec<DailyPoint>);

impl DailySeries {
    pub fn new(points: Vec<DailyPoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[DailyPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last `n` points (fewer when the series is shorter).
    pub fn trailing(&self, n: usize) -> &[DailyPoint] {
        self.window_before(0, n)
    }

    /// Up to `n` points ending `skip` points before the end of the series.
    ///
    /// `window_before(14, 14)` is the block at offsets `[-28, -14)` from the end.
    pub fn window_before(&self, skip: usize, n: usize) -> &[DailyPoint] {
        let end = self.0.len().saturating_sub(skip);
        let start = end.saturating_sub(n);
        &self.0[start..end]
    }

    /// Points dated on or after `from`.
    pub fn since(&self, from: NaiveDate) -> &[DailyPoint] {
        let start = self.0.partition_point(|p| p.date < from);
        &self.0[start..]
    }

    /// Latest date with a non-zero quantity sold.
    pub fn last_sale_date(&self) -> Option<NaiveDate> {
        self.0.iter().rev().find(|p| p.quantity > 0).map(|p| p.date)
    }
}

impl From<Vec<DailyPoint>> for DailySeries {
    fn from(points: Vec<DailyPoint>) -> Self {
        Self(points)
    }
}

impl FromIterator<DailyPoint> for DailySeries {
    fn from_iter<I: IntoIterator<Item = DailyPoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Arithmetic mean, 0 for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

pub(crate) fn mean_quantity(points: &[DailyPoint]) -> f64 {
    mean(points.iter().map(|p| p.quantity as f64))
}

pub(crate) fn mean_revenue(points: &[DailyPoint]) -> f64 {
    mean(points.iter().map(|p| p.revenue))
}

pub(crate) fn mean_order_count(points: &[DailyPoint]) -> f64 {
    mean(points.iter().map(|p| p.order_count as f64))
}
