use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

pub fn insert_session(conn: &Connection, token: &str, user_id: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![token, user_id, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn find_session_user(conn: &Connection, token: &str) -> AppResult<Option<i64>> {
    Ok(conn
        .query_row(
            "SELECT user_id FROM sessions WHERE token = ?1",
            [token],
            |row| row.get(0),
        )
        .optional()?)
}

/// Returns true when a session was removed.
pub fn delete_session(conn: &Connection, token: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM sessions WHERE token = ?1", [token])?;
    Ok(n > 0)
}

/// Drop every session of `user_id`; returns how many were removed.
pub fn delete_user_sessions(conn: &Connection, user_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM sessions WHERE user_id = ?1", [user_id])?)
}

pub fn count_sessions(conn: &Connection, user_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?)
}
