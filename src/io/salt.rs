//! SALT light-curve fit results (comma-separated, one header row).
//!
//! Columns are positional: the object identifier, `x1` and `color` sit at fixed
//! indices of the fitter's output. A measured peak magnitude column is optional.
//!
//! Rows with missing or non-numeric covariates are skipped and reported so the
//! catalog handed to the classifier is complete. A repeated identifier keeps the
//! values of its last row, at the position of its first.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::{Catalog, CatalogEntry};
use crate::error::AppError;
use crate::io::table::{RowError, parse_f64};

/// Column positions (0-based) in the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaltColumns {
    pub id: usize,
    pub x1: usize,
    pub color: usize,
    pub magnitude: Option<usize>,
}

impl Default for SaltColumns {
    fn default() -> Self {
        Self {
            id: 1,
            x1: 7,
            color: 9,
            magnitude: None,
        }
    }
}

/// Parsed results table.
#[derive(Debug, Clone)]
pub struct SaltTable {
    pub catalog: Catalog,
    /// Measured magnitudes aligned with `catalog`, when a column was requested.
    pub magnitudes: Option<Vec<f64>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

pub fn parse_salt(reader: impl Read, columns: &SaltColumns) -> Result<SaltTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    let mut magnitudes = Vec::new();
    let mut positions = HashMap::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, columns) {
            Ok((entry, magnitude)) => {
                // A repeated identifier keeps its first position but takes the later row's values.
                if let Some(&pos) = positions.get(&entry.id) {
                    row_errors.push(RowError {
                        line,
                        id: Some(entry.id.clone()),
                        message: "duplicate identifier, replaces the earlier row".to_string(),
                    });
                    entries[pos] = entry;
                    if let (Some(m), Some(slot)) = (magnitude, magnitudes.get_mut(pos)) {
                        *slot = m;
                    }
                    continue;
                }
                positions.insert(entry.id.clone(), entries.len());
                entries.push(entry);
                if let Some(m) = magnitude {
                    magnitudes.push(m);
                }
            }
            Err((id, message)) => row_errors.push(RowError { line, id, message }),
        }
    }

    let catalog = Catalog::from_entries(entries)?;
    Ok(SaltTable {
        catalog,
        magnitudes: columns.magnitude.map(|_| magnitudes),
        row_errors,
        rows_read,
    })
}

type RowFailure = (Option<String>, String);

fn parse_row(record: &StringRecord, columns: &SaltColumns) -> Result<(CatalogEntry, Option<f64>), RowFailure> {
    let id = match record.get(columns.id).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => return Err((None, format!("missing identifier in column {}", columns.id))),
    };

    let number = |col: usize, name: &str| -> Result<f64, RowFailure> {
        record
            .get(col)
            .and_then(parse_f64)
            .ok_or_else(|| (Some(id.clone()), format!("missing/invalid `{name}` in column {col}")))
    };

    let x1 = number(columns.x1, "x1")?;
    let color = number(columns.color, "color")?;
    let magnitude = match columns.magnitude {
        Some(col) => Some(number(col, "magnitude")?),
        None => None,
    };

    Ok((CatalogEntry { id, x1, color }, magnitude))
}

pub fn read_salt(path: &Path, columns: &SaltColumns) -> Result<SaltTable, AppError> {
    info!(path = %path.display(), "reading SALT results");
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open SALT results '{}': {e}", path.display())))?;
    let table = parse_salt(file, columns)?;

    for err in &table.row_errors {
        warn!(
            line = err.line,
            id = err.id.as_deref().unwrap_or("-"),
            "skipping SALT row: {}",
            err.message
        );
    }
    if table.catalog.is_empty() {
        return Err(AppError::new(
            3,
            format!("No valid rows in SALT results '{}'.", path.display()),
        ));
    }
    info!(
        rows_read = table.rows_read,
        rows_used = table.catalog.len(),
        "SALT catalog loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "idx,name,z,t0,dt0,x0,dx0,x1,dx1,c,dc,mB\n";

    fn sample() -> String {
        let mut text = String::from(HEADER);
        text.push_str("0,SN2005el,0.015,53646.1,0.1,0.01,0.001,-0.11239155464737571,0.05,0.18966532125179603,0.02,-18.28\n");
        text.push_str("1,SN2006ax,0.017,53827.1,0.1,0.01,0.001,0.31821090814784814,0.04,0.27001552143799223,0.02,-19.2\n");
        text
    }

    #[test]
    fn reads_positional_columns() {
        let table = parse_salt(sample().as_bytes(), &SaltColumns::default()).unwrap();
        let x1 = table.catalog.x1();
        let color = table.catalog.color();
        assert_eq!(table.catalog.ids().collect::<Vec<_>>(), vec!["SN2005el", "SN2006ax"]);
        assert_eq!(x1, vec![-0.11239155464737571, 0.31821090814784814]);
        assert_eq!(color, vec![0.18966532125179603, 0.27001552143799223]);
        assert!(table.magnitudes.is_none());
    }

    #[test]
    fn optional_magnitude_column() {
        let columns = SaltColumns {
            magnitude: Some(11),
            ..Default::default()
        };
        let table = parse_salt(sample().as_bytes(), &columns).unwrap();
        assert_eq!(table.magnitudes, Some(vec![-18.28, -19.2]));
    }

    #[test]
    fn bad_and_duplicate_rows_are_reported() {
        let mut text = sample();
        text.push_str("2,SN2005el,0.015,0,0,0,0,0.1,0,0.1,0,-19.0\n");
        text.push_str("3,SN2007bad,0.02,0,0,0,0,,0,0.1,0,-19.0\n");
        text.push_str("4,SN2008short,0.02\n");
        let table = parse_salt(text.as_bytes(), &SaltColumns::default()).unwrap();
        assert_eq!(table.catalog.len(), 2);
        assert_eq!(table.rows_read, 5);
        let lines: Vec<usize> = table.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![4, 5, 6]);
        assert!(table.row_errors[0].message.starts_with("duplicate identifier"));
        assert_eq!(table.row_errors[1].id.as_deref(), Some("SN2007bad"));
    }

    #[test]
    fn repeated_identifier_takes_last_row_values() {
        let mut text = sample();
        text.push_str("2,SN2005el,0.015,0,0,0,0,0.25,0,0.05,0,-19.0
");
        let columns = SaltColumns {
            magnitude: Some(11),
            ..Default::default()
        };
        let table = parse_salt(text.as_bytes(), &columns).unwrap();
        assert_eq!(table.catalog.ids().collect::<Vec<_>>(), vec!["SN2005el", "SN2006ax"]);
        let entry = table.catalog.get("SN2005el").unwrap();
        assert_eq!((entry.x1, entry.color), (0.25, 0.05));
        assert_eq!(table.magnitudes, Some(vec![-19.0, -19.2]));
    }
}
