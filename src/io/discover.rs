//! Model discovery in a data directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::AppError;

/// Model identifiers with a `<id>.<extension>` file in `data_dir`, sorted.
pub fn discover_models(data_dir: &Path, extension: &str) -> Result<Vec<String>, AppError> {
    if !data_dir.is_dir() {
        return Err(AppError::new(
            2,
            format!("Data directory '{}' does not exist.", data_dir.display()),
        ));
    }

    let entries = fs::read_dir(data_dir)
        .map_err(|e| AppError::new(2, format!("Failed to list '{}': {e}", data_dir.display())))?;

    let mut ids = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::new(2, format!("Failed to list '{}': {e}", data_dir.display())))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            ids.push(stem.to_string());
        }
    }

    ids.sort();
    debug!(dir = %data_dir.display(), extension, count = ids.len(), "discovered models");
    Ok(ids)
}
