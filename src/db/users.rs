use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{NewUser, User};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const USER_SELECT: &str = "SELECT u.id, u.username, u.first_name, u.last_name, u.email,
        u.is_staff, u.is_active, u.password_hash, u.date_joined, u.last_updated_date,
        r.role_name
    FROM users u
    LEFT JOIN roles r ON r.id = u.role_id";

pub fn map_user(row: &Row) -> rusqlite::Result<User> {
    let role_name: Option<String> = row.get("role_name")?;
    let role = match role_name {
        Some(name) => Some(Role::from_db_str(&name).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidRole(name.clone())),
            )
        })?),
        None => None,
    };

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        is_staff: row.get::<_, i32>("is_staff")? == 1,
        is_active: row.get::<_, i32>("is_active")? == 1,
        role,
        password_hash: row.get("password_hash")?,
        date_joined: row.get("date_joined")?,
        last_updated_date: row
            .get::<_, Option<String>>("last_updated_date")?
            .unwrap_or_default(),
    })
}

/// Primary key of the seeded row for `role`.
pub fn role_id(conn: &Connection, role: Role) -> AppResult<i64> {
    conn.query_row(
        "SELECT id FROM roles WHERE role_name = ?1",
        [role.to_db_str()],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("Role '{}'", role.to_db_str())))
}

pub fn insert_user(conn: &Connection, user: &NewUser, password_hash: &str) -> AppResult<i64> {
    let role_id = match user.role {
        Some(r) => Some(role_id(conn, r)?),
        None => None,
    };
    let now = Local::now().to_rfc3339();

    conn.execute(
        "INSERT INTO users (username, first_name, last_name, email, is_staff, is_active,
                            date_joined, last_updated_date, role_id, password_hash)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6, ?7, ?8)",
        params![
            user.username,
            user.first_name,
            user.last_name,
            user.email,
            if user.is_staff { 1 } else { 0 },
            now,
            role_id,
            password_hash,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_user_by_id(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(&format!("{USER_SELECT} WHERE u.id = ?1"))?;
    Ok(stmt.query_row([id], map_user).optional()?)
}

pub fn find_user_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(&format!("{USER_SELECT} WHERE u.username = ?1"))?;
    Ok(stmt.query_row([username], map_user).optional()?)
}

/// Admin listing: optional role filter and a substring search over
/// username, names and email. Ordered by username.
pub fn list_users(
    conn: &Connection,
    role: Option<Role>,
    search: Option<&str>,
) -> AppResult<Vec<User>> {
    let pattern = search.map(|s| format!("%{}%", s.trim()));
    let mut stmt = conn.prepare(&format!(
        "{USER_SELECT}
         WHERE (?1 IS NULL OR r.role_name = ?1)
           AND (?2 IS NULL
                OR u.username LIKE ?2 OR u.first_name LIKE ?2
                OR u.last_name LIKE ?2 OR u.email LIKE ?2)
         ORDER BY u.username ASC"
    ))?;

    let rows = stmt.query_map(params![role.map(|r| r.to_db_str()), pattern], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_role(conn: &Connection, user_id: i64, role: Option<Role>) -> AppResult<()> {
    let role_id = match role {
        Some(r) => Some(role_id(conn, r)?),
        None => None,
    };
    touch(
        conn,
        "UPDATE users SET role_id = ?1, last_updated_date = ?2 WHERE id = ?3",
        params![role_id, Local::now().to_rfc3339(), user_id],
        user_id,
    )
}

pub fn update_password(conn: &Connection, user_id: i64, password_hash: &str) -> AppResult<()> {
    touch(
        conn,
        "UPDATE users SET password_hash = ?1, last_updated_date = ?2 WHERE id = ?3",
        params![password_hash, Local::now().to_rfc3339(), user_id],
        user_id,
    )
}

pub fn set_active(conn: &Connection, user_id: i64, active: bool) -> AppResult<()> {
    touch(
        conn,
        "UPDATE users SET is_active = ?1, last_updated_date = ?2 WHERE id = ?3",
        params![if active { 1 } else { 0 }, Local::now().to_rfc3339(), user_id],
        user_id,
    )
}

fn touch(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql], user_id: i64) -> AppResult<()> {
    let changed = conn.execute(sql, params)?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("User {}", user_id)));
    }
    Ok(())
}
