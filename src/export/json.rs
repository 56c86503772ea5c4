use super::model::JobRunExport;
use crate::errors::AppResult;
use std::path::Path;

/// Write job runs as pretty-printed JSON.
pub fn write_json(path: &Path, rows: &[JobRunExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows)?;
    std::fs::write(path, json)?;
    Ok(())
}
