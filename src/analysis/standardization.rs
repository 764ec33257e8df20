//! Classification of catalog objects against the standardization relation.
//!
//! Band construction, per entry:
//!
//! ```text
//! S  = intercept - slope_x1 * x1 + slope_color * color
//! Z1 = S - half_band_width
//! Z2 = S + half_band_width
//! ```
//!
//! With `AcceptanceRule::EmbeddedRadius` the queried magnitude and both edges
//! are lifted to `(x1, color, value)` and compared by distance from the origin,
//! `r(v) = sqrt(x1² + color² + v²)`. The decision is
//!
//! ```text
//! gated  = if r(mag) >= r(Z2) { r(mag) } else { 0 }
//! inside = gated <= r(Z1)
//! ```
//!
//! so an entry passes when its radius is below the upper-edge radius, or when it
//! lies between the upper- and lower-edge radii. For the usual negative absolute
//! magnitudes this keeps everything not brighter than the lower band edge.

use crate::domain::{
    AcceptanceRule, Catalog, Classification, ClassificationResult, StandardizationParameters,
};
use crate::error::AnalysisError;
use crate::math::embedded_radius;

/// Surface values and band edges, one per catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizationBand {
    pub surface: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl StandardizationBand {
    pub fn len(&self) -> usize {
        self.surface.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surface.is_empty()
    }
}

/// Build the acceptance band for aligned covariate arrays.
pub fn build_band(
    params: &StandardizationParameters,
    x1: &[f64],
    color: &[f64],
) -> Result<StandardizationBand, AnalysisError> {
    AnalysisError::ensure_len("color covariates", x1.len(), color.len())?;
    params.validate()?;

    let surface: Vec<f64> = x1
        .iter()
        .zip(color)
        .map(|(&x, &c)| params.surface(x, c))
        .collect();
    let lower = surface.iter().map(|s| s - params.half_band_width).collect();
    let upper = surface.iter().map(|s| s + params.half_band_width).collect();

    Ok(StandardizationBand {
        surface,
        lower,
        upper,
    })
}

/// Decide a single point given its band edges.
pub fn is_inside(rule: AcceptanceRule, x1: f64, color: f64, mag: f64, lower: f64, upper: f64) -> bool {
    match rule {
        AcceptanceRule::EmbeddedRadius => {
            let r_mag = embedded_radius(x1, color, mag);
            let r_lower = embedded_radius(x1, color, lower);
            let r_upper = embedded_radius(x1, color, upper);
            let gated = if r_mag >= r_upper { r_mag } else { 0.0 };
            gated <= r_lower
        }
        AcceptanceRule::Linear => lower <= mag && mag <= upper,
    }
}

/// Classify aligned arrays; `mags[i]` is the query for covariates `(x1[i], color[i])`.
pub fn classify(
    params: &StandardizationParameters,
    rule: AcceptanceRule,
    x1: &[f64],
    color: &[f64],
    mags: &[f64],
) -> Result<Vec<bool>, AnalysisError> {
    AnalysisError::ensure_len("queried magnitudes", x1.len(), mags.len())?;
    let band = build_band(params, x1, color)?;

    Ok((0..mags.len())
        .map(|i| is_inside(rule, x1[i], color[i], mags[i], band.lower[i], band.upper[i]))
        .collect())
}

/// Classify every catalog entry against the magnitude at the same position.
pub fn classify_catalog(
    params: &StandardizationParameters,
    rule: AcceptanceRule,
    catalog: &Catalog,
    mags: &[f64],
) -> Result<ClassificationResult, AnalysisError> {
    AnalysisError::ensure_len("queried magnitudes", catalog.len(), mags.len())?;
    let x1 = catalog.x1();
    let color = catalog.color();
    let band = build_band(params, &x1, &color)?;

    let entries = catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| Classification {
            id: entry.id.clone(),
            index: i,
            magnitude: mags[i],
            surface: band.surface[i],
            lower: band.lower[i],
            upper: band.upper[i],
            inside: is_inside(rule, entry.x1, entry.color, mags[i], band.lower[i], band.upper[i]),
        })
        .collect();

    Ok(ClassificationResult { entries })
}
