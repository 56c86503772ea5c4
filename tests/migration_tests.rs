use driverlog::db::migrate::{applied_versions, run_pending_migrations};
use driverlog::errors::AppError;
use rusqlite::Connection;

mod common;
use common::open_test_db;

fn has_table(conn: &Connection, table: &str) -> bool {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        > 0
}

fn has_column(conn: &Connection, table: &str, column: &str) -> bool {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table)).unwrap();
    let cols: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .map(|c| c.unwrap())
        .collect();
    cols.iter().any(|c| c == column)
}

fn bank_fields_applied(conn: &Connection) -> bool {
    applied_versions(conn)
        .unwrap()
        .iter()
        .any(|v| v.ends_with("driver_bank_fields"))
}

#[test]
fn test_migrations_are_idempotent() {
    let pool = open_test_db("migrate_twice");
    let before = applied_versions(&pool.conn).unwrap();
    assert_eq!(before.len(), 3);

    run_pending_migrations(&pool.conn).unwrap();
    assert_eq!(applied_versions(&pool.conn).unwrap(), before);
}

#[test]
fn test_failed_migration_leaves_nothing_behind() {
    let pool = open_test_db("migrate_rollback");

    // Legacy driver profiles that already carry both address columns, so
    // the rename at the end of the bank migration fails.
    pool.conn
        .execute_batch(
            r#"
            DELETE FROM log
             WHERE operation = 'migration_applied' AND target LIKE '%driver_bank_fields';
            DROP TABLE driver_profiles;
            DROP TABLE banks;
            CREATE TABLE driver_profiles (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id         INTEGER NOT NULL UNIQUE,
                address         TEXT,
                current_address TEXT
            );
            "#,
        )
        .unwrap();

    let err = run_pending_migrations(&pool.conn).unwrap_err();
    assert!(matches!(err, AppError::Migration(_)));

    assert!(!has_table(&pool.conn, "banks"));
    assert!(!has_column(&pool.conn, "driver_profiles", "bank_id"));
    assert!(!has_column(&pool.conn, "driver_profiles", "id_card_address"));
    assert!(!bank_fields_applied(&pool.conn));

    // Once the conflict is gone the same migration applies cleanly.
    pool.conn
        .execute_batch("ALTER TABLE driver_profiles DROP COLUMN current_address;")
        .unwrap();
    run_pending_migrations(&pool.conn).unwrap();

    assert!(has_table(&pool.conn, "banks"));
    assert!(has_column(&pool.conn, "driver_profiles", "bank_id"));
    assert!(has_column(&pool.conn, "driver_profiles", "current_address"));
    assert!(!has_column(&pool.conn, "driver_profiles", "address"));
    assert!(bank_fields_applied(&pool.conn));
}
