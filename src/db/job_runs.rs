use crate::errors::{AppError, AppResult};
use crate::models::job_run::{DayEntry, JobRunRecord};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub fn map_job_run(row: &Row) -> rusqlite::Result<JobRunRecord> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(JobRunRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        round_info: row.get("round_info")?,
        remarks: row.get("remarks")?,
        created_date: row
            .get::<_, Option<String>>("created_date")?
            .unwrap_or_default(),
        last_updated_date: row
            .get::<_, Option<String>>("last_updated_date")?
            .unwrap_or_default(),
    })
}

fn remarks_value(entry: &DayEntry) -> Option<&str> {
    if entry.remarks.is_empty() {
        None
    } else {
        Some(entry.remarks.as_str())
    }
}

pub fn find_job_run(
    conn: &Connection,
    user_id: i64,
    date: &NaiveDate,
) -> AppResult<Option<JobRunRecord>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM job_runs WHERE user_id = ?1 AND date = ?2")?;
    let date_str = date.format("%Y-%m-%d").to_string();
    Ok(stmt.query_row(params![user_id, date_str], map_job_run).optional()?)
}

pub fn insert_job_run(
    conn: &Connection,
    user_id: i64,
    date: &NaiveDate,
    entry: &DayEntry,
) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT INTO job_runs (user_id, date, round_info, remarks, created_date, last_updated_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )?;
    stmt.execute(params![
        user_id,
        date.format("%Y-%m-%d").to_string(),
        entry.round_info,
        remarks_value(entry),
        now,
    ])?;
    Ok(conn.last_insert_rowid())
}

/// Update round label and remarks in place; creation timestamp is kept.
pub fn update_job_run(conn: &Connection, id: i64, entry: &DayEntry) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE job_runs
         SET round_info = ?1, remarks = ?2, last_updated_date = ?3
         WHERE id = ?4",
    )?;
    stmt.execute(params![
        entry.round_info,
        remarks_value(entry),
        Local::now().to_rfc3339(),
        id,
    ])?;
    Ok(())
}

/// Records of one user with `from <= date <= to`, earliest date first.
pub fn load_job_runs_between(
    conn: &Connection,
    user_id: i64,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<JobRunRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM job_runs
         WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(
        params![
            user_id,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string(),
        ],
        map_job_run,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_job_runs(conn: &Connection, user_id: i64) -> AppResult<Vec<JobRunRecord>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM job_runs WHERE user_id = ?1 ORDER BY date ASC")?;
    let rows = stmt.query_map([user_id], map_job_run)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_job_runs(conn: &Connection, user_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM job_runs WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?)
}
