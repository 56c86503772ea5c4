use crate::errors::{AppError, AppResult};
use crate::models::mileage::{Mileage, NewMileage};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_mileage(row: &Row) -> rusqlite::Result<Mileage> {
    let date_str: String = row.get("update_date")?;
    let update_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;
    let mile: i64 = row.get("mile")?;

    Ok(Mileage {
        id: row.get("id")?,
        driver_profile_id: row.get("driver_profile_id")?,
        mile: u32::try_from(mile).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Integer,
                Box::new(e),
            )
        })?,
        mile_image: row.get("mile_image")?,
        front_image: row.get("front_image")?,
        back_image: row.get("back_image")?,
        left_image: row.get("left_image")?,
        right_image: row.get("right_image")?,
        update_date,
    })
}

pub fn insert_mileage(
    conn: &Connection,
    driver_profile_id: i64,
    entry: &NewMileage,
    update_date: &NaiveDate,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO mileage (driver_profile_id, mile, mile_image, front_image,
                              back_image, left_image, right_image, update_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            driver_profile_id,
            entry.mile,
            entry.mile_image,
            entry.front_image,
            entry.back_image,
            entry.left_image,
            entry.right_image,
            update_date.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Mileage of one vehicle, optionally restricted to `from..=to`, oldest first.
pub fn load_mileage(
    conn: &Connection,
    driver_profile_id: i64,
    range: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<Mileage>> {
    let (from, to) = match range {
        Some((f, t)) => (
            Some(f.format("%Y-%m-%d").to_string()),
            Some(t.format("%Y-%m-%d").to_string()),
        ),
        None => (None, None),
    };

    let mut stmt = conn.prepare_cached(
        "SELECT * FROM mileage
         WHERE driver_profile_id = ?1
           AND (?2 IS NULL OR update_date >= ?2)
           AND (?3 IS NULL OR update_date <= ?3)
         ORDER BY update_date ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![driver_profile_id, from, to], map_mileage)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn latest_mileage(conn: &Connection, driver_profile_id: i64) -> AppResult<Option<Mileage>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM mileage WHERE driver_profile_id = ?1
         ORDER BY update_date DESC, id DESC LIMIT 1",
    )?;
    Ok(stmt.query_row([driver_profile_id], map_mileage).optional()?)
}
