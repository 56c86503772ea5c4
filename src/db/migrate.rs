use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

const INITIAL_SCHEMA: &str = "20240101_0001_initial_schema";
const DRIVER_BANK_FIELDS: &str = "20240315_0002_driver_bank_fields";
const LOGIN_SESSIONS: &str = "20240402_0003_login_sessions";

/// Ensure that the `log` table exists. Migration markers live in it, so it
/// has to come first.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![Local::now().to_rfc3339(), version, message],
    )?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Accounts, roles, profiles, job runs and mileage.
fn create_initial_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS roles (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            role_name         TEXT NOT NULL UNIQUE
                              CHECK(role_name IN ('driver','operator','admin')),
            role_description  TEXT,
            created_date      TEXT,
            last_updated_date TEXT
        );

        CREATE TABLE IF NOT EXISTS warehouses (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            warehouse_name    TEXT CHECK(length(warehouse_name) <= 100),
            warehouse_address TEXT,
            created_date      TEXT,
            last_updated_date TEXT
        );

        CREATE TABLE IF NOT EXISTS users (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            username          TEXT NOT NULL UNIQUE CHECK(length(username) <= 150),
            first_name        TEXT NOT NULL DEFAULT '',
            last_name         TEXT NOT NULL DEFAULT '',
            email             TEXT NOT NULL DEFAULT '',
            is_staff          INTEGER NOT NULL DEFAULT 0,
            is_active         INTEGER NOT NULL DEFAULT 1,
            date_joined       TEXT NOT NULL,
            last_updated_date TEXT,
            role_id           INTEGER REFERENCES roles(id) ON DELETE CASCADE,
            password_hash     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS driver_profiles (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            warehouse_id      INTEGER REFERENCES warehouses(id) ON DELETE SET NULL,
            id_card_number    TEXT,
            address           TEXT,
            phone_number      TEXT,
            bank_account      TEXT,
            car_license       TEXT,
            id_card_image     TEXT CHECK(length(id_card_image) <= 511),
            driver_license    TEXT CHECK(length(driver_license) <= 511),
            photo_with_card   TEXT CHECK(length(photo_with_card) <= 511),
            profile_photo     TEXT CHECK(length(profile_photo) <= 511),
            created_date      TEXT,
            last_updated_date TEXT
        );

        CREATE TABLE IF NOT EXISTS operator_profiles (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            office_location  TEXT CHECK(length(office_location) <= 255),
            extension_number TEXT CHECK(length(extension_number) <= 10)
        );

        CREATE TABLE IF NOT EXISTS admin_profiles (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            admin_level TEXT CHECK(length(admin_level) <= 50),
            department  TEXT CHECK(length(department) <= 100)
        );

        CREATE TABLE IF NOT EXISTS job_runs (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date              TEXT NOT NULL,
            round_info        TEXT NOT NULL CHECK(length(round_info) <= 30),
            remarks           TEXT,
            created_date      TEXT,
            last_updated_date TEXT,
            UNIQUE(user_id, date)
        );

        CREATE TABLE IF NOT EXISTS mileage (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            driver_profile_id INTEGER NOT NULL REFERENCES driver_profiles(id) ON DELETE CASCADE,
            mile              INTEGER NOT NULL CHECK(mile >= 0),
            mile_image        TEXT,
            front_image       TEXT,
            back_image        TEXT,
            left_image        TEXT,
            right_image       TEXT,
            update_date       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_mileage_profile_date ON mileage(driver_profile_id, update_date);
        "#,
    )?;

    seed_roles(conn)?;
    Ok(())
}

fn seed_roles(conn: &Connection) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO roles (role_name, role_description, created_date, last_updated_date)
         VALUES (?1, ?2, ?3, ?3)",
    )?;
    for role in Role::ALL {
        stmt.execute(params![role.to_db_str(), role.description(), now])?;
    }
    Ok(())
}

/// Banks reference table; driver profiles gain a bank and split their
/// address into the one on the ID card and the current one.
fn migrate_driver_bank_fields(conn: &Connection) -> AppResult<()> {
    let has_legacy_address = table_has_column(conn, "driver_profiles", "address")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS banks (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            bank_code         TEXT NOT NULL UNIQUE CHECK(length(bank_code) <= 255),
            bank_name_th      TEXT,
            bank_name_eng     TEXT,
            created_date      TEXT,
            last_updated_date TEXT
        );

        ALTER TABLE driver_profiles ADD COLUMN bank_id INTEGER REFERENCES banks(id) ON DELETE SET NULL;
        ALTER TABLE driver_profiles ADD COLUMN id_card_address TEXT;
        "#,
    )?;

    if has_legacy_address {
        conn.execute_batch("ALTER TABLE driver_profiles RENAME COLUMN address TO current_address;")?;
    } else {
        conn.execute_batch("ALTER TABLE driver_profiles ADD COLUMN current_address TEXT;")?;
    }

    Ok(())
}

fn create_sessions_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token      TEXT PRIMARY KEY,
            user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
        "#,
    )?;
    Ok(())
}

type Migration = (&'static str, &'static str, fn(&Connection) -> AppResult<()>);

const MIGRATIONS: [Migration; 3] = [
    (
        INITIAL_SCHEMA,
        "Created accounts, profiles, job runs and mileage tables",
        create_initial_schema,
    ),
    (
        DRIVER_BANK_FIELDS,
        "Added banks and driver bank/address fields",
        migrate_driver_bank_fields,
    ),
    (
        LOGIN_SESSIONS,
        "Added login sessions table",
        create_sessions_table,
    ),
];

/// Public entry point: run all pending migrations in order.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let mut pending = Vec::new();
    for migration in MIGRATIONS {
        if !is_applied(conn, migration.0)? {
            pending.push(migration);
        }
    }

    if pending.is_empty() {
        log::debug!("schema up to date");
        return Ok(());
    }

    // A migration and its marker commit together; dropping `tx` on error
    // rolls back every statement of that migration.
    for (version, message, apply) in pending {
        log::info!("applying migration {version}");
        let tx = conn.unchecked_transaction()?;
        apply(&tx).map_err(|e| AppError::Migration(format!("{}: {}", version, e)))?;
        mark_applied(&tx, version, message)?;
        tx.commit()?;
        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    if out.len() < MIGRATIONS.len() {
        warning(format!(
            "{} migration(s) pending, run `db --migrate`",
            MIGRATIONS.len() - out.len()
        ));
    }
    Ok(out)
}
