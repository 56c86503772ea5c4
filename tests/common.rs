#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use driverlog::config::Config;
use driverlog::core::accounts::AccountLogic;
use driverlog::db::initialize::init_db;
use driverlog::db::pool::DbPool;
use driverlog::models::role::Role;
use driverlog::models::user::{NewUser, User};
use driverlog::web::AppContext;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn drv() -> Command {
    cargo_bin_cmd!("driverlog")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// leftovers of a previous run (database, session token, media folder).
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_driverlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{}.session", db_path)).ok();
    fs::remove_dir_all(Config::default().with_database(&db_path).media_root).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Small file standing in for an uploaded photo.
pub fn temp_image(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_upload.jpg", name));
    fs::write(&path, b"\xFF\xD8\xFF fake jpeg").expect("write temp image");
    path
}

/// Initialize the DB through the CLI (no config file written).
pub fn init_cli_db(db_path: &str) {
    drv()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Library-level handle on a fresh, migrated test database.
pub fn open_test_db(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn create_user(pool: &mut DbPool, username: &str, role: Option<Role>) -> User {
    AccountLogic::create_user(
        &mut pool.conn,
        NewUser {
            username: username.to_string(),
            email: format!("{}@Example.COM", username),
            password: "secret".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            role,
            is_staff: false,
        },
    )
    .expect("create user")
}

/// Request context over a fresh test database.
pub fn test_context(name: &str) -> AppContext {
    let db_path = setup_test_db(name);
    let cfg = Config::default().with_database(&db_path);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    AppContext::new(pool, &cfg)
}
