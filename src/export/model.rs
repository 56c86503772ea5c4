// src/export/model.rs

use crate::models::job_run::JobRunRecord;
use serde::Serialize;

/// Flat job-run row for CSV / JSON export.
#[derive(Serialize, Clone, Debug)]
pub struct JobRunExport {
    pub username: String,
    pub date: String,
    pub round_info: String,
    pub remarks: String,
    pub last_updated_date: String,
}

impl JobRunExport {
    pub fn from_record(username: &str, r: &JobRunRecord) -> Self {
        Self {
            username: username.to_string(),
            date: r.date_str(),
            round_info: r.round_info.clone(),
            remarks: r.remarks_str().to_string(),
            last_updated_date: r.last_updated_date.clone(),
        }
    }
}
