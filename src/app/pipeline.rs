//! Shared pipeline logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflows:
//! - SALT results -> peak magnitudes -> standardization classification
//! - model list -> lbol tables -> crossing times (parallel)
//! - model list -> tt tables -> Phillips summary
//!
//! The CLI layer can then focus on presentation (printing and exports).
//! Per-model I/O or analysis failures never abort a run: the model is skipped
//! with a warning and listed in the output.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::{
    ModelCrossing, ModelCurve, PeakSummary, PhillipsRelation, analyze_models, classify_catalog, peak_summary,
};
use crate::domain::{AnalysisConfig, Catalog, ClassificationResult};
use crate::error::AppError;
use crate::io::discover::discover_models;
use crate::io::lbol::{lbol_path, read_lbol};
use crate::io::salt::{SaltColumns, read_salt};
use crate::io::tt::{read_tt, tt_path};

/// A model left out of a run, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedModel {
    pub id: String,
    pub reason: String,
}

impl SkippedModel {
    fn new(id: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(model = id, "skipping model: {reason}");
        Self {
            id: id.to_string(),
            reason,
        }
    }
}

/// Outputs of a standardization selection.
#[derive(Debug, Clone)]
pub struct SelectionOutput {
    /// Catalog entries that had a queried magnitude, in catalog order.
    pub catalog: Catalog,
    pub classification: ClassificationResult,
    pub skipped: Vec<SkippedModel>,
}

/// Outputs of a crossing-time run.
#[derive(Debug, Clone, Default)]
pub struct CrossingOutput {
    pub crossings: Vec<ModelCrossing>,
    pub skipped: Vec<SkippedModel>,
}

/// One row of the Phillips summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhillipsRow {
    pub id: String,
    pub summary: PeakSummary,
    /// Predicted `M_V` for the measured decline, when it exists.
    pub predicted_v: Option<f64>,
    pub within_band: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct PhillipsOutput {
    pub rows: Vec<PhillipsRow>,
    pub skipped: Vec<SkippedModel>,
}

/// Explicit model list when given, otherwise every model with an `extension`
/// file in the data directory.
pub fn resolve_models(config: &AnalysisConfig, explicit: &[String], extension: &str) -> Result<Vec<String>, AppError> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }
    let ids = discover_models(&config.data_dir, extension)?;
    if ids.is_empty() {
        return Err(AppError::new(
            3,
            format!("No .{extension} files found in '{}'.", config.data_dir.display()),
        ));
    }
    Ok(ids)
}

/// Classify the SALT catalog.
///
/// Queried magnitudes come from the catalog's own magnitude column when
/// `columns.magnitude` is set, otherwise from the peak B magnitude of each
/// model's tt table. Entries without a magnitude are dropped together with
/// their covariates so positions stay aligned.
pub fn run_selection(config: &AnalysisConfig, salt_path: &Path, columns: &SaltColumns) -> Result<SelectionOutput, AppError> {
    let table = read_salt(salt_path, columns)?;

    let (catalog, mags, skipped) = match table.magnitudes {
        Some(mags) => (table.catalog, mags, Vec::new()),
        None => peak_magnitudes(config, &table.catalog),
    };

    if catalog.is_empty() {
        return Err(AppError::new(3, "No catalog entries have a usable peak magnitude."));
    }

    let classification = classify_catalog(&config.standardization, config.rule, &catalog, &mags)?;
    info!(
        entries = classification.len(),
        accepted = classification.accepted().count(),
        rule = ?config.rule,
        "standardization selection done"
    );

    Ok(SelectionOutput {
        catalog,
        classification,
        skipped,
    })
}

fn peak_magnitudes(config: &AnalysisConfig, catalog: &Catalog) -> (Catalog, Vec<f64>, Vec<SkippedModel>) {
    let mut mags = Vec::with_capacity(catalog.len());
    let mut skipped = Vec::new();
    let mut kept = HashSet::new();

    for entry in catalog.entries() {
        let path = tt_path(&config.data_dir, &entry.id);
        match read_tt(&path, config.tt_header_rows) {
            Ok(curve) => match curve.peak_b() {
                Some(peak) => {
                    mags.push(peak);
                    kept.insert(entry.id.clone());
                }
                None => skipped.push(SkippedModel::new(&entry.id, "tt table has no finite B magnitudes")),
            },
            Err(e) => skipped.push(SkippedModel::new(&entry.id, e.message())),
        }
    }

    let filtered = catalog.filtered(|e| kept.contains(&e.id));
    (filtered, mags, skipped)
}

/// Crossing times for each model; lbol tables are read sequentially, the
/// analysis runs in parallel.
pub fn run_crossings(config: &AnalysisConfig, model_ids: &[String]) -> CrossingOutput {
    let mut curves = Vec::with_capacity(model_ids.len());
    let mut skipped = Vec::new();

    for id in model_ids {
        match read_lbol(&lbol_path(&config.data_dir, id)) {
            Ok(curve) => curves.push(ModelCurve {
                id: id.clone(),
                curve,
            }),
            Err(e) => skipped.push(SkippedModel::new(id, e.message())),
        }
    }

    let mut crossings = Vec::with_capacity(curves.len());
    for outcome in analyze_models(&curves, &config.decay, config.eps) {
        match outcome.result {
            Ok(crossing) => {
                debug!(
                    model = %crossing.id,
                    t_a = crossing.crossing.t_a,
                    t_b = crossing.crossing.t_b,
                    "crossing times"
                );
                if !crossing.crossing.is_found() {
                    info!(model = %crossing.id, "no crossing with the deposition curve");
                }
                crossings.push(crossing);
            }
            Err(e) => skipped.push(SkippedModel::new(&outcome.id, e.to_string())),
        }
    }

    CrossingOutput { crossings, skipped }
}

pub fn run_phillips(config: &AnalysisConfig, model_ids: &[String], relation: &PhillipsRelation) -> PhillipsOutput {
    let mut out = PhillipsOutput::default();

    for id in model_ids {
        let curve = match read_tt(&tt_path(&config.data_dir, id), config.tt_header_rows) {
            Ok(c) => c,
            Err(e) => {
                out.skipped.push(SkippedModel::new(id, e.message()));
                continue;
            }
        };
        let Some(summary) = peak_summary(&curve) else {
            out.skipped.push(SkippedModel::new(id, "tt table has no finite magnitudes"));
            continue;
        };
        out.rows.push(PhillipsRow {
            id: id.clone(),
            predicted_v: summary.delta_m15.map(|d| relation.predict(d)),
            within_band: summary.delta_m15.map(|d| relation.contains(d, summary.peak_v)),
            summary,
        });
    }

    out
}
