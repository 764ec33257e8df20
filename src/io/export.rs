//! Export results to CSV and JSON.
//!
//! The CSV exports are meant to be easy to consume in spreadsheets or downstream
//! plotting scripts; the JSON summary captures a whole run with its settings.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use csv::Writer;
use serde::Serialize;

use crate::analysis::ModelCrossing;
use crate::app::pipeline::{PhillipsRow, SkippedModel};
use crate::domain::{AcceptanceRule, ClassificationResult, DecayConstants, StandardizationParameters};
use crate::error::AppError;

/// Write per-model crossing times to a CSV file.
///
/// Models without a crossing are written with `found=false` and zero times.
pub fn write_crossings_csv(path: &Path, crossings: &[ModelCrossing]) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    write_row(&mut writer, ["model", "nickel_mass", "found", "t_a", "t_b", "lbol_a", "lbol_b"])?;

    for c in crossings {
        let x = &c.crossing;
        write_row(
            &mut writer,
            [
                c.id.clone(),
                format!("{:.1}", c.nickel_mass),
                x.is_found().to_string(),
                format!("{:.6}", x.t_a),
                format!("{:.6}", x.t_b),
                format!("{:.6}", x.value_at_a),
                format!("{:.6}", x.value_at_b),
            ],
        )?;
    }

    finish(writer)
}

/// Write per-entry classification verdicts to a CSV file.
pub fn write_classification_csv(path: &Path, result: &ClassificationResult) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    write_row(&mut writer, ["id", "index", "magnitude", "surface", "lower", "upper", "inside"])?;

    for c in &result.entries {
        write_row(
            &mut writer,
            [
                c.id.clone(),
                c.index.to_string(),
                format!("{:.4}", c.magnitude),
                format!("{:.4}", c.surface),
                format!("{:.4}", c.lower),
                format!("{:.4}", c.upper),
                c.inside.to_string(),
            ],
        )?;
    }

    finish(writer)
}

/// Write the Phillips summary to a CSV file.
pub fn write_phillips_csv(path: &Path, rows: &[PhillipsRow]) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    write_row(&mut writer, ["model", "peak_b", "peak_v", "delta_m15", "predicted_v", "within_band"])?;

    for r in rows {
        write_row(
            &mut writer,
            [
                r.id.clone(),
                format!("{:.4}", r.summary.peak_b),
                format!("{:.4}", r.summary.peak_v),
                r.summary.delta_m15.map(|v| format!("{v:.4}")).unwrap_or_default(),
                r.predicted_v.map(|v| format!("{v:.4}")).unwrap_or_default(),
                r.within_band.map(|v| v.to_string()).unwrap_or_default(),
            ],
        )?;
    }

    finish(writer)
}

fn csv_writer(path: &Path) -> Result<Writer<File>, AppError> {
    Writer::from_path(path).map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))
}

fn write_row<I, T>(writer: &mut Writer<File>, record: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    writer
        .write_record(record)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))
}

fn finish(mut writer: Writer<File>) -> Result<(), AppError> {
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

/// JSON summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub command: String,
    pub generated: String,
    pub eps: f64,
    pub decay: DecayConstants,
    pub standardization: StandardizationParameters,
    pub rule: AcceptanceRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub crossings: Vec<ModelCrossing>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phillips: Vec<PhillipsRow>,
    pub skipped: Vec<SkippedModel>,
}

impl RunSummary {
    pub fn new(command: &str, config: &crate::domain::AnalysisConfig) -> Self {
        Self {
            tool: "light".to_string(),
            command: command.to_string(),
            generated: Local::now().to_rfc3339(),
            eps: config.eps,
            decay: config.decay,
            standardization: config.standardization,
            rule: config.rule,
            classification: None,
            crossings: Vec::new(),
            phillips: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = create(path)?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

fn create(path: &Path) -> Result<File, AppError> {
    File::create(path).map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisConfig, Classification, CrossingResult};

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("light-curves-export-{}-{name}", std::process::id()))
    }

    #[test]
    fn crossings_csv_marks_sentinel() {
        let path = scratch("crossings.csv");
        let rows = vec![
            ModelCrossing {
                id: "m16".to_string(),
                nickel_mass: 0.6,
                crossing: CrossingResult {
                    t_a: 14.5,
                    t_b: 48.0,
                    value_at_a: 42.9,
                    value_at_b: 42.3,
                },
            },
            ModelCrossing {
                id: "m12".to_string(),
                nickel_mass: 0.2,
                crossing: CrossingResult::NOT_FOUND,
            },
        ];
        write_crossings_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("m16,0.6,true,14.500000,48.000000"));
        assert!(lines[2].starts_with("m12,0.2,false,0.000000"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn classification_csv_quotes_ids_with_commas() {
        use crate::analysis::classify_catalog;
        use crate::io::salt::{SaltColumns, parse_salt};

        let text = "idx,name,z,t0,dt0,x0,dx0,x1,dx1,c,dc\n\
                    0,\"SN 2005el, host A\",0,0,0,0,0,-0.11239155464737571,0,0.18966532125179603,0\n";
        let table = parse_salt(text.as_bytes(), &SaltColumns::default()).unwrap();
        let result = classify_catalog(
            &StandardizationParameters::default(),
            AcceptanceRule::EmbeddedRadius,
            &table.catalog,
            &[-18.28],
        )
        .unwrap();

        let path = scratch("classification.csv");
        write_classification_csv(&path, &result).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 7);
        assert_eq!(&rows[0][0], "SN 2005el, host A");
        assert_eq!(&rows[0][6], "true");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn summary_json_round_trips_through_serde_value() {
        let path = scratch("summary.json");
        let mut summary = RunSummary::new("select", &AnalysisConfig::default());
        summary.classification = Some(ClassificationResult {
            entries: vec![Classification {
                id: "SN2005el".to_string(),
                index: 0,
                magnitude: -18.28,
                surface: -18.89,
                lower: -19.39,
                upper: -18.39,
                inside: true,
            }],
        });
        write_summary_json(&path, &summary).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["tool"], "light");
        assert_eq!(value["rule"], "embedded-radius");
        assert_eq!(value["classification"]["entries"][0]["inside"], true);
        assert!(value.get("crossings").is_none());
        std::fs::remove_file(&path).unwrap();
    }
}
