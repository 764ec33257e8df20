//! Whitespace-delimited numeric tables.
//!
//! Simulation outputs (`.lbol`, `.tt`) are plain text: a fixed number of header
//! lines followed by rows of whitespace-separated numbers. We pick only the
//! columns we need and keep them aligned row-for-row.
//!
//! Row-level problems (too few columns, unparsable numbers) skip the row and
//! are reported back as `RowError`s; blank lines are ignored.

use std::io::BufRead;

/// A row-level error encountered while reading a table.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the source file.
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Selected columns of a numeric table, aligned by row.
#[derive(Debug, Clone, Default)]
pub struct NumericTable {
    pub columns: Vec<Vec<f64>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl NumericTable {
    pub fn rows_used(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }
}

/// Read `wanted` columns (0-based) after skipping `header_rows` lines.
pub fn parse_numeric_columns(
    reader: impl BufRead,
    header_rows: usize,
    wanted: &[usize],
) -> std::io::Result<NumericTable> {
    let mut table = NumericTable {
        columns: vec![Vec::new(); wanted.len()],
        ..Default::default()
    };

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if idx < header_rows || line.trim().is_empty() {
            continue;
        }
        table.rows_read += 1;

        match parse_row(&line, wanted) {
            Ok(values) => {
                for (column, value) in table.columns.iter_mut().zip(values) {
                    column.push(value);
                }
            }
            Err(message) => table.row_errors.push(RowError {
                line: line_no,
                id: None,
                message,
            }),
        }
    }

    Ok(table)
}

fn parse_row(line: &str, wanted: &[usize]) -> Result<Vec<f64>, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    wanted
        .iter()
        .map(|&col| {
            let raw = fields
                .get(col)
                .ok_or_else(|| format!("expected at least {} columns, found {}", col + 1, fields.len()))?;
            parse_f64(raw).ok_or_else(|| format!("column {col}: invalid number '{raw}'"))
        })
        .collect()
}

/// Parse a finite float; `None` for empty, malformed or non-finite input.
pub fn parse_f64(s: &str) -> Option<f64> {
    let v = s.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
