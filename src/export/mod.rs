// src/export/mod.rs

mod csv;
pub(crate) mod fs_utils;
mod json;
mod model;

pub use model::JobRunExport;

use crate::errors::AppResult;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn write(&self, path: &Path, rows: &[JobRunExport]) -> AppResult<()> {
        match self {
            ExportFormat::Csv => csv::write_csv(path, rows)?,
            ExportFormat::Json => json::write_json(path, rows)?,
        }
        notify_export_success(&self.as_str().to_uppercase(), path);
        Ok(())
    }
}
