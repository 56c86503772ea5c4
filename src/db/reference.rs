use crate::errors::{AppError, AppResult};
use crate::models::reference::{Bank, Warehouse};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_warehouse(row: &Row) -> rusqlite::Result<Warehouse> {
    Ok(Warehouse {
        id: row.get("id")?,
        name: row.get("warehouse_name")?,
        address: row.get("warehouse_address")?,
        created_date: row
            .get::<_, Option<String>>("created_date")?
            .unwrap_or_default(),
        last_updated_date: row
            .get::<_, Option<String>>("last_updated_date")?
            .unwrap_or_default(),
    })
}

fn map_bank(row: &Row) -> rusqlite::Result<Bank> {
    Ok(Bank {
        id: row.get("id")?,
        bank_code: row.get("bank_code")?,
        bank_name_th: row.get("bank_name_th")?,
        bank_name_eng: row.get("bank_name_eng")?,
        created_date: row
            .get::<_, Option<String>>("created_date")?
            .unwrap_or_default(),
        last_updated_date: row
            .get::<_, Option<String>>("last_updated_date")?
            .unwrap_or_default(),
    })
}

pub fn insert_warehouse(conn: &Connection, name: &str, address: Option<&str>) -> AppResult<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Warehouse name must be set".into()));
    }
    if name.chars().count() > 100 {
        return Err(AppError::InvalidInput(
            "Warehouse name is longer than 100 characters".into(),
        ));
    }
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO warehouses (warehouse_name, warehouse_address, created_date, last_updated_date)
         VALUES (?1, ?2, ?3, ?3)",
        params![name, address, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_warehouse(conn: &Connection, id: i64) -> AppResult<Option<Warehouse>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM warehouses WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_warehouse).optional()?)
}

pub fn list_warehouses(conn: &Connection) -> AppResult<Vec<Warehouse>> {
    let mut stmt = conn.prepare("SELECT * FROM warehouses ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_warehouse)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_bank(
    conn: &Connection,
    bank_code: &str,
    name_th: Option<&str>,
    name_eng: Option<&str>,
) -> AppResult<i64> {
    let code = bank_code.trim();
    if code.is_empty() {
        return Err(AppError::InvalidInput("Bank code must be set".into()));
    }
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO banks (bank_code, bank_name_th, bank_name_eng, created_date, last_updated_date)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![code, name_th, name_eng, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_bank_by_code(conn: &Connection, bank_code: &str) -> AppResult<Option<Bank>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM banks WHERE bank_code = ?1")?;
    Ok(stmt.query_row([bank_code.trim()], map_bank).optional()?)
}

/// Banks whose code or either name contains `search`, ordered by code.
pub fn list_banks(conn: &Connection, search: Option<&str>) -> AppResult<Vec<Bank>> {
    let pattern = search.map(|s| format!("%{}%", s.trim()));
    let mut stmt = conn.prepare(
        "SELECT * FROM banks
         WHERE ?1 IS NULL
            OR bank_code LIKE ?1 OR bank_name_th LIKE ?1 OR bank_name_eng LIKE ?1
         ORDER BY bank_code ASC",
    )?;
    let rows = stmt.query_map([pattern], map_bank)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
