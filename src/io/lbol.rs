//! Bolometric light-curve tables (`<model>.lbol`).
//!
//! One header line, then whitespace-separated rows; column 0 is the time since
//! explosion (days) and column 2 is `log10 L_bol` (erg/s).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::TimeSeries;
use crate::error::AppError;
use crate::io::table::parse_numeric_columns;

pub const LBOL_EXTENSION: &str = "lbol";
pub const LBOL_HEADER_ROWS: usize = 1;
pub const LBOL_TIME_COLUMN: usize = 0;
pub const LBOL_LUMINOSITY_COLUMN: usize = 2;

pub fn lbol_path(data_dir: &Path, model_id: &str) -> PathBuf {
    data_dir.join(format!("{model_id}.{LBOL_EXTENSION}"))
}

/// Parse an lbol table into a `(time, log L)` series.
pub fn parse_lbol(reader: impl BufRead, source: &str) -> Result<TimeSeries, AppError> {
    let table = parse_numeric_columns(reader, LBOL_HEADER_ROWS, &[LBOL_TIME_COLUMN, LBOL_LUMINOSITY_COLUMN])
        .map_err(|e| AppError::new(2, format!("Failed to read lbol table '{source}': {e}")))?;

    for err in &table.row_errors {
        warn!(source, line = err.line, "skipping lbol row: {}", err.message);
    }
    if table.rows_used() == 0 {
        return Err(AppError::new(3, format!("No valid rows in lbol table '{source}'.")));
    }

    let mut columns = table.columns.into_iter();
    let times = columns.next().unwrap_or_default();
    let values = columns.next().unwrap_or_default();
    Ok(TimeSeries::new(times, values)?)
}

pub fn read_lbol(path: &Path) -> Result<TimeSeries, AppError> {
    info!(path = %path.display(), "reading lbol table");
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open lbol table '{}': {e}", path.display())))?;
    parse_lbol(BufReader::new(file), &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_time_and_luminosity_columns() {
        let text = "t  lg_Tcol  lg_Lbol\n0.5 4.1 42.80\n1.0 4.2 42.85\n2.0 4.3 42.90\n";
        let series = parse_lbol(text.as_bytes(), "test").unwrap();
        assert_eq!(series.times(), &[0.5, 1.0, 2.0]);
        assert_eq!(series.values(), &[42.80, 42.85, 42.90]);
    }

    #[test]
    fn header_only_is_no_data() {
        let err = parse_lbol("t a b\n".as_bytes(), "test").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn path_uses_extension() {
        let p = lbol_path(Path::new("data/raw_data"), "m16");
        assert_eq!(p, Path::new("data/raw_data/m16.lbol"));
    }
}
