//! Monthly job-run sheet: per-day upsert of round labels and remarks, and
//! the ordered month listing.

use crate::db::job_runs::{find_job_run, insert_job_run, load_job_runs_between, update_job_run};
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::job_run::{DayEntry, JobRunRecord, MonthSpec};
use rusqlite::Connection;
use std::collections::BTreeMap;

/// Maximum length of a round label (column `job_runs.round_info`).
pub const ROUND_INFO_MAX_LEN: usize = 30;

fn validate_entry(day: u32, entry: &DayEntry) -> AppResult<()> {
    if entry.round_info.chars().count() > ROUND_INFO_MAX_LEN {
        return Err(AppError::InvalidInput(format!(
            "Round for day {} is longer than {} characters",
            day, ROUND_INFO_MAX_LEN
        )));
    }
    Ok(())
}

/// Create or update one record per non-empty day of `month` for `user_id`.
///
/// Days `1..=n` are visited, where `n` is the length of the month; entries
/// keyed beyond `n` are ignored. A day whose trimmed round label and
/// remarks are both empty is skipped and any existing record for it is left
/// untouched. All writes happen in a single transaction: on error nothing
/// of the month is written.
///
/// Returns the number of records created or updated.
pub fn upsert_month(
    conn: &mut Connection,
    user_id: i64,
    month: MonthSpec,
    entries: &BTreeMap<u32, DayEntry>,
) -> AppResult<usize> {
    let days = month.days();
    let tx = conn.transaction()?;
    let mut written = 0;

    for day in 1..=days {
        let Some(entry) = entries.get(&day).and_then(DayEntry::normalized) else {
            continue;
        };
        validate_entry(day, &entry)?;

        let date = month.day(day)?;
        match find_job_run(&tx, user_id, &date)? {
            Some(existing) => update_job_run(&tx, existing.id, &entry)?,
            None => {
                insert_job_run(&tx, user_id, &date, &entry)?;
            }
        }
        written += 1;
    }

    tx.commit()?;

    let ignored = entries.keys().filter(|d| **d == 0 || **d > days).count();
    if ignored > 0 {
        log::debug!("{month}: ignored {ignored} entries outside 1..={days}");
    }

    if written > 0 {
        ttlog_quiet(
            conn,
            "jobrun_upsert",
            &format!("user {} {}", user_id, month),
            &format!("{} day(s) written", written),
        );
    }

    Ok(written)
}

/// All records of `user_id` dated within `month`, earliest first.
pub fn list_month(conn: &Connection, user_id: i64, month: MonthSpec) -> AppResult<Vec<JobRunRecord>> {
    load_job_runs_between(conn, user_id, &month.first_day()?, &month.last_day()?)
}
