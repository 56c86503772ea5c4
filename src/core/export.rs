use crate::core::job_runs::list_month;
use crate::db::job_runs::load_all_job_runs;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::{ExportFormat, JobRunExport};
use crate::models::job_run::MonthSpec;
use crate::models::user::User;
use crate::ui::messages::info;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the job runs of `user` for `month` (or all of them) and return
    /// how many rows were written.
    pub fn export(
        pool: &mut DbPool,
        user: &User,
        month: Option<MonthSpec>,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let records = match month {
            Some(m) => list_month(&pool.conn, user.id, m)?,
            None => load_all_job_runs(&pool.conn, user.id)?,
        };

        if records.is_empty() {
            info(format!("No job runs to export for {}", user.username));
        }

        let rows: Vec<JobRunExport> = records
            .iter()
            .map(|r| JobRunExport::from_record(&user.username, r))
            .collect();

        format.write(path, &rows)?;

        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "{} job run(s) of {} as {}",
                rows.len(),
                user.username,
                format.as_str()
            ),
        );

        Ok(rows.len())
    }
}
