//! Broad-band magnitude tables (`<model>.tt`).
//!
//! The table carries a long preamble (87 lines in the standard output) before
//! whitespace-separated rows. Column 0 is time (days), column 8 is M_B and
//! column 9 is M_V.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::MagnitudeCurve;
use crate::error::AppError;
use crate::io::table::parse_numeric_columns;

pub const TT_EXTENSION: &str = "tt";
pub const TT_HEADER_ROWS: usize = 87;
pub const TT_TIME_COLUMN: usize = 0;
pub const TT_B_COLUMN: usize = 8;
pub const TT_V_COLUMN: usize = 9;

pub fn tt_path(data_dir: &Path, model_id: &str) -> PathBuf {
    data_dir.join(format!("{model_id}.{TT_EXTENSION}"))
}

pub fn parse_tt(reader: impl BufRead, header_rows: usize, source: &str) -> Result<MagnitudeCurve, AppError> {
    let table = parse_numeric_columns(reader, header_rows, &[TT_TIME_COLUMN, TT_B_COLUMN, TT_V_COLUMN])
        .map_err(|e| AppError::new(2, format!("Failed to read tt table '{source}': {e}")))?;

    for err in &table.row_errors {
        warn!(source, line = err.line, "skipping tt row: {}", err.message);
    }
    if table.rows_used() == 0 {
        return Err(AppError::new(3, format!("No valid rows in tt table '{source}'.")));
    }

    let mut columns = table.columns.into_iter();
    Ok(MagnitudeCurve {
        times: columns.next().unwrap_or_default(),
        mag_b: columns.next().unwrap_or_default(),
        mag_v: columns.next().unwrap_or_default(),
    })
}

pub fn read_tt(path: &Path, header_rows: usize) -> Result<MagnitudeCurve, AppError> {
    info!(path = %path.display(), "reading tt table");
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open tt table '{}': {e}", path.display())))?;
    parse_tt(BufReader::new(file), header_rows, &path.display().to_string())
}
