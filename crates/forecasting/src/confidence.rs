//! Confidence decay shared by the demand and revenue forecasters.

use serde::{Deserialize, Serialize};

/// Confidence lost per forecast step.
pub const DECAY_PER_STEP: f64 = 0.01;

/// Saturation bounds for a decaying confidence curve.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBounds {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceBounds {
    /// Bounds used by the per-product demand forecast.
    pub const DEMAND: Self = Self {
        lower: 0.5,
        upper: 0.95,
    };

    /// Bounds used by the catalog revenue trend prediction.
    pub const REVENUE: Self = Self {
        lower: 0.6,
        upper: 0.9,
    };

    pub fn is_valid(&self) -> bool {
        self.lower.is_finite()
            && self.upper.is_finite()
            && 0.0 <= self.lower
            && self.lower <= self.upper
            && self.upper <= 1.0
    }
}

/// Confidence of forecast step `step` (1-based) within a `horizon`-day forecast.
///
/// Decays linearly with the step and saturates at the bounds. Steps past the
/// horizon are evaluated at the horizon.
pub fn decaying_confidence(step: u32, horizon: u32, bounds: ConfidenceBounds) -> f64 {
    let step = step.min(horizon) as f64;
    (1.0 - step * DECAY_PER_STEP).clamp(bounds.lower, bounds.upper)
}
