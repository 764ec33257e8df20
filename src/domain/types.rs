//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built fresh per run from boundary readers
//! - handed to the numeric core as read-only inputs
//! - exported to JSON/CSV

use std::collections::HashMap;
use std::f64::consts::LN_2;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Default tolerance for the crossing-time search.
pub const DEFAULT_CROSSING_EPS: f64 = 1e-5;

/// Ni56 half-life (days).
pub const NI56_HALF_LIFE_DAYS: f64 = 6.1;
/// Co56 half-life (days).
pub const CO56_HALF_LIFE_DAYS: f64 = 77.1;
/// Ni56 energy deposition rate per solar mass of nickel (erg/s).
pub const NI56_ENERGY_COEFF: f64 = 6.45e43;
/// Co56 energy deposition rate per solar mass of initial nickel (erg/s).
pub const CO56_ENERGY_COEFF: f64 = 1.45e43;

/// Ordered `(time, value)` samples.
///
/// Sorted ascending by time by convention of the readers that produce it; this
/// is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, AnalysisError> {
        AnalysisError::ensure_len("time series values", times.len(), values.len())?;
        Ok(Self { times, values })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }
}

/// Broad-band absolute magnitudes of one simulation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MagnitudeCurve {
    pub times: Vec<f64>,
    pub mag_b: Vec<f64>,
    pub mag_v: Vec<f64>,
}

impl MagnitudeCurve {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Brightest (minimum) B magnitude.
    pub fn peak_b(&self) -> Option<f64> {
        min_finite(&self.mag_b)
    }

    /// Brightest (minimum) V magnitude.
    pub fn peak_v(&self) -> Option<f64> {
        min_finite(&self.mag_v)
    }
}

fn min_finite(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::min)
}

/// Physical constants of the Ni56 -> Co56 -> Fe56 chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayConstants {
    pub half_life_ni: f64,
    pub half_life_co: f64,
    pub energy_coeff_ni: f64,
    pub energy_coeff_co: f64,
}

impl Default for DecayConstants {
    fn default() -> Self {
        Self {
            half_life_ni: NI56_HALF_LIFE_DAYS,
            half_life_co: CO56_HALF_LIFE_DAYS,
            energy_coeff_ni: NI56_ENERGY_COEFF,
            energy_coeff_co: CO56_ENERGY_COEFF,
        }
    }
}

/// Inputs of the decay deposition model: the decay constants plus one per-model
/// nickel mass (solar masses).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayModelParameters {
    pub nickel_mass_fraction: f64,
    pub half_life_ni: f64,
    pub half_life_co: f64,
    pub energy_coeff_ni: f64,
    pub energy_coeff_co: f64,
}

impl DecayModelParameters {
    pub fn new(nickel_mass_fraction: f64, constants: &DecayConstants) -> Self {
        Self {
            nickel_mass_fraction,
            half_life_ni: constants.half_life_ni,
            half_life_co: constants.half_life_co,
            energy_coeff_ni: constants.energy_coeff_ni,
            energy_coeff_co: constants.energy_coeff_co,
        }
    }

    /// Parameters with the standard chain constants.
    pub fn standard(nickel_mass_fraction: f64) -> Self {
        Self::new(nickel_mass_fraction, &DecayConstants::default())
    }

    /// e-folding time of Ni56 (days).
    pub fn lifetime_ni(&self) -> f64 {
        self.half_life_ni / LN_2
    }

    /// e-folding time of Co56 (days).
    pub fn lifetime_co(&self) -> f64 {
        self.half_life_co / LN_2
    }

    /// Reject parameters for which the log-deposition is undefined.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.nickel_mass_fraction.is_finite() && self.nickel_mass_fraction > 0.0) {
            return Err(AnalysisError::domain(format!(
                "nickel mass fraction must be positive, got {}",
                self.nickel_mass_fraction
            )));
        }
        let checks = [
            ("Ni56 half-life", self.half_life_ni),
            ("Co56 half-life", self.half_life_co),
            ("Ni56 energy coefficient", self.energy_coeff_ni),
            ("Co56 energy coefficient", self.energy_coeff_co),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnalysisError::domain(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Earliest and latest samples where the observed curve reaches the deposition
/// curve within tolerance.
///
/// All fields are `0.0` when no sample qualifies; check `is_found()` before
/// using the times.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrossingResult {
    pub t_a: f64,
    pub t_b: f64,
    pub value_at_a: f64,
    pub value_at_b: f64,
}

impl CrossingResult {
    pub const NOT_FOUND: CrossingResult = CrossingResult {
        t_a: 0.0,
        t_b: 0.0,
        value_at_a: 0.0,
        value_at_b: 0.0,
    };

    pub fn is_found(&self) -> bool {
        *self != Self::NOT_FOUND
    }

    /// `Some(self)` unless this is the not-found sentinel.
    pub fn found(self) -> Option<Self> {
        self.is_found().then_some(self)
    }
}

/// Calibration of the SALT-style standardization relation.
///
/// Surface: `M = intercept - slope_x1 * x1 + slope_color * color`, with a
/// symmetric `± half_band_width` acceptance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardizationParameters {
    pub intercept: f64,
    pub slope_x1: f64,
    pub slope_color: f64,
    pub half_band_width: f64,
}

impl Default for StandardizationParameters {
    fn default() -> Self {
        Self {
            intercept: -19.48,
            slope_x1: 0.154,
            slope_color: 3.02,
            half_band_width: 0.5,
        }
    }
}

impl StandardizationParameters {
    /// Surface value for one pair of covariates.
    pub fn surface(&self, x1: f64, color: f64) -> f64 {
        self.intercept - self.slope_x1 * x1 + self.slope_color * color
    }

    /// Reject calibrations whose band edges would be undefined or swapped.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let finite = [
            ("intercept", self.intercept),
            ("x1 slope", self.slope_x1),
            ("color slope", self.slope_color),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(AnalysisError::domain(format!("{name} must be finite, got {value}")));
            }
        }
        if !(self.half_band_width.is_finite() && self.half_band_width >= 0.0) {
            return Err(AnalysisError::domain(format!(
                "half band width must be non-negative, got {}",
                self.half_band_width
            )));
        }
        Ok(())
    }
}

/// How a queried magnitude is compared against the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptanceRule {
    /// Compare 3D radii `sqrt(x1² + color² + value²)` of the magnitude and both
    /// band edges.
    #[default]
    EmbeddedRadius,
    /// Plain `lower <= mag <= upper`.
    Linear,
}

/// One catalog object with its standardization covariates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub x1: f64,
    pub color: f64,
}

/// Ordered collection of catalog entries keyed by unique identifier.
///
/// Iteration order is insertion order; classifier queries are aligned with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, AnalysisError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.id.clone(), i).is_some() {
                return Err(AnalysisError::DuplicateIdentifier {
                    id: entry.id.clone(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn x1(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.x1).collect()
    }

    pub fn color(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.color).collect()
    }

    /// New catalog with only the entries matching `keep`, order preserved.
    pub fn filtered(&self, mut keep: impl FnMut(&CatalogEntry) -> bool) -> Catalog {
        let entries: Vec<CatalogEntry> = self.entries.iter().filter(|e| keep(e)).cloned().collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Catalog { entries, index }
    }
}

/// Verdict for a single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub id: String,
    /// Position in the catalog.
    pub index: usize,
    pub magnitude: f64,
    pub surface: f64,
    pub lower: f64,
    pub upper: f64,
    pub inside: bool,
}

/// Per-entry verdicts in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub entries: Vec<Classification>,
}

impl ClassificationResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn accepted(&self) -> impl Iterator<Item = &Classification> {
        self.entries.iter().filter(|c| c.inside)
    }

    pub fn accepted_ids(&self) -> Vec<String> {
        self.accepted().map(|c| c.id.clone()).collect()
    }

    pub fn is_inside(&self, id: &str) -> Option<bool> {
        self.entries.iter().find(|c| c.id == id).map(|c| c.inside)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory holding `<model>.tt` and `<model>.lbol` files.
    pub data_dir: PathBuf,
    /// Header lines to skip in `.tt` tables.
    pub tt_header_rows: usize,

    pub eps: f64,
    pub decay: DecayConstants,

    pub standardization: StandardizationParameters,
    pub rule: AcceptanceRule,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/raw_data"),
            tt_header_rows: crate::io::tt::TT_HEADER_ROWS,
            eps: DEFAULT_CROSSING_EPS,
            decay: DecayConstants::default(),
            standardization: StandardizationParameters::default(),
            rule: AcceptanceRule::default(),
            export_csv: None,
            export_json: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, x1: f64, color: f64) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            x1,
            color,
        }
    }

    #[test]
    fn time_series_rejects_ragged_columns() {
        let err = TimeSeries::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::DimensionMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn standard_lifetimes_match_chain() {
        let p = DecayModelParameters::standard(0.6);
        assert!((p.lifetime_ni() - 8.8).abs() < 0.01);
        assert!((p.lifetime_co() - 111.2).abs() < 0.1);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_mass() {
        assert!(DecayModelParameters::standard(0.0).validate().is_err());
        assert!(DecayModelParameters::standard(-0.1).validate().is_err());
        assert!(DecayModelParameters::standard(f64::NAN).validate().is_err());
    }

    #[test]
    fn standardization_band_width_must_be_non_negative() {
        let mut p = StandardizationParameters::default();
        assert!(p.validate().is_ok());
        p.half_band_width = 0.0;
        assert!(p.validate().is_ok());
        p.half_band_width = -0.1;
        assert!(matches!(p.validate(), Err(AnalysisError::Domain { .. })));
        p.half_band_width = f64::INFINITY;
        assert!(p.validate().is_err());
    }

    #[test]
    fn not_found_sentinel() {
        assert!(!CrossingResult::NOT_FOUND.is_found());
        assert!(CrossingResult::default().found().is_none());
        let hit = CrossingResult {
            t_a: 12.0,
            t_b: 40.0,
            value_at_a: 42.5,
            value_at_b: 42.1,
        };
        assert_eq!(hit.found(), Some(hit));
    }

    #[test]
    fn surface_uses_signed_slopes() {
        let p = StandardizationParameters::default();
        assert!((p.surface(0.0, 0.0) + 19.48).abs() < 1e-12);
        assert!((p.surface(1.0, 0.0) - (-19.48 - 0.154)).abs() < 1e-12);
        assert!((p.surface(0.0, 1.0) - (-19.48 + 3.02)).abs() < 1e-12);
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let err = Catalog::from_entries(vec![entry("a", 0.0, 0.0), entry("a", 1.0, 1.0)]).unwrap_err();
        assert_eq!(err, AnalysisError::DuplicateIdentifier { id: "a".to_string() });
    }

    #[test]
    fn catalog_filter_keeps_order_and_reindexes() {
        let catalog = Catalog::from_entries(vec![
            entry("a", 0.1, 0.2),
            entry("b", 0.3, 0.4),
            entry("c", 0.5, 0.6),
        ])
        .unwrap();
        let kept = catalog.filtered(|e| e.id != "b");
        assert_eq!(kept.ids().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(kept.position("c"), Some(1));
        assert_eq!(kept.x1(), vec![0.1, 0.5]);
        assert!(kept.get("b").is_none());
    }
}
