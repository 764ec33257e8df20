//! Peak magnitudes and decline rate (Phillips relation).
//!
//! `Δm15` is the change in V magnitude between the V peak and the first sample
//! more than 15 days later. The empirical relation
//! `M_V = intercept + slope * Δm15` with scatter `sigma` is used to flag models
//! that fall outside the observed population.

use serde::Serialize;

use crate::domain::MagnitudeCurve;

/// Days after peak at which the decline is measured.
pub const DECLINE_WINDOW_DAYS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhillipsRelation {
    pub intercept: f64,
    pub slope: f64,
    pub sigma: f64,
}

impl Default for PhillipsRelation {
    fn default() -> Self {
        Self {
            intercept: -20.883,
            slope: 1.949,
            sigma: 0.417_f64.sqrt(),
        }
    }
}

impl PhillipsRelation {
    pub fn predict(&self, delta_m15: f64) -> f64 {
        self.intercept + self.slope * delta_m15
    }

    /// Whether `peak_v` lies within `± sigma` of the relation.
    pub fn contains(&self, delta_m15: f64, peak_v: f64) -> bool {
        (peak_v - self.predict(delta_m15)).abs() <= self.sigma
    }
}

/// Peak and decline summary of one magnitude curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakSummary {
    pub peak_b: f64,
    pub peak_v: f64,
    /// `None` when the curve ends within 15 days of the V peak.
    pub delta_m15: Option<f64>,
}

/// Index of the first minimum (brightest sample).
fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match best {
            Some(b) if values[b] <= v => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Decline in magnitude from the peak to the first sample past the window.
pub fn delta_m15(times: &[f64], mags: &[f64]) -> Option<f64> {
    let peak = argmin(mags)?;
    let cutoff = times.get(peak)? + DECLINE_WINDOW_DAYS;
    let later = (peak..times.len().min(mags.len())).find(|&i| times[i] > cutoff)?;
    Some((mags[peak] - mags[later]).abs())
}

pub fn peak_summary(curve: &MagnitudeCurve) -> Option<PeakSummary> {
    Some(PeakSummary {
        peak_b: curve.peak_b()?,
        peak_v: curve.peak_v()?,
        delta_m15: delta_m15(&curve.times, &curve.mag_v),
    })
}
