use super::model::JobRunExport;
use crate::errors::AppResult;
use ::csv::Writer;
use std::path::Path;

/// Write job runs as CSV, header row first.
pub fn write_csv(path: &Path, rows: &[JobRunExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    if rows.is_empty() {
        wtr.write_record(["username", "date", "round_info", "remarks", "last_updated_date"])?;
    }

    wtr.flush()?;
    Ok(())
}
