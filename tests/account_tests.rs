use driverlog::core::accounts::{AccountLogic, normalize_email};
use driverlog::core::password::{DEFAULT_ROUNDS, hash_password, hash_password_rounds, verify_password};
use driverlog::core::session::SessionLogic;
use driverlog::db::profiles::{find_admin_profile, find_driver_profile, find_operator_profile};
use driverlog::db::sessions::count_sessions;
use driverlog::db::users::{list_users, set_active};
use driverlog::errors::AppError;
use driverlog::models::role::Role;
use driverlog::models::user::NewUser;

mod common;
use common::{create_user, open_test_db};

#[test]
fn test_password_hash_roundtrip() {
    let hash = hash_password("s3cret");
    assert!(hash.starts_with("sha256$"));
    assert!(verify_password("s3cret", &hash));
    assert!(!verify_password("wrong", &hash));
    assert!(!verify_password("s3cret", "plain-text"));

    // fresh salt every time
    assert_ne!(hash, hash_password("s3cret"));
}

#[test]
fn test_password_hash_records_rounds() {
    let hash = hash_password("s3cret");
    let parts: Vec<&str> = hash.split('$').collect();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[1], DEFAULT_ROUNDS.to_string());

    // the stored round count wins over the current default
    let light = hash_password_rounds("s3cret", 3);
    assert!(light.starts_with("sha256$3$"));
    assert!(verify_password("s3cret", &light));

    let tampered = light.replacen("sha256$3$", "sha256$2$", 1);
    assert!(!verify_password("s3cret", &tampered));
    assert!(!verify_password("s3cret", &light.replacen("$3$", "$0$", 1)));
}

#[test]
fn test_email_domain_is_lowercased() {
    assert_eq!(normalize_email("John.Doe@Example.COM"), "John.Doe@example.com");
    assert_eq!(normalize_email("  nobody  "), "nobody");
}

#[test]
fn test_create_user_requires_username() {
    let mut pool = open_test_db("account_empty_username");
    let err = AccountLogic::create_user(
        &mut pool.conn,
        NewUser {
            username: "   ".to_string(),
            password: "x".to_string(),
            ..Default::default()
        },
    )
    .unwrap_err();

    match err {
        AppError::InvalidInput(msg) => assert_eq!(msg, "The Username field must be set"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_create_user_attaches_profile() {
    let mut pool = open_test_db("account_profile");
    let driver = create_user(&mut pool, "somchai", Some(Role::Driver));
    let operator = create_user(&mut pool, "malee", Some(Role::Operator));
    let plain = create_user(&mut pool, "guest", None);

    assert_eq!(driver.email, "somchai@example.com");
    assert!(driver.has_role(Role::Driver));
    assert!(find_driver_profile(&pool.conn, driver.id).unwrap().is_some());
    assert!(find_operator_profile(&pool.conn, operator.id).unwrap().is_some());
    assert!(find_driver_profile(&pool.conn, plain.id).unwrap().is_none());
    assert_eq!(plain.role, None);
}

#[test]
fn test_duplicate_username_is_rejected() {
    let mut pool = open_test_db("account_duplicate");
    create_user(&mut pool, "somchai", Some(Role::Driver));

    let err = AccountLogic::create_user(
        &mut pool.conn,
        NewUser {
            username: "somchai".to_string(),
            password: "x".to_string(),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_superuser_is_staff_admin() {
    let mut pool = open_test_db("account_superuser");
    let admin = AccountLogic::create_superuser(
        &mut pool.conn,
        NewUser {
            username: "root".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    assert!(admin.is_staff);
    assert!(admin.has_role(Role::Admin));
    assert!(find_admin_profile(&pool.conn, admin.id).unwrap().is_some());
}

#[test]
fn test_change_role_attaches_new_profile() {
    let mut pool = open_test_db("account_change_role");
    let user = create_user(&mut pool, "malee", Some(Role::Operator));

    let updated = AccountLogic::change_role(&mut pool.conn, "malee", Some(Role::Driver)).unwrap();
    assert!(updated.has_role(Role::Driver));
    assert!(find_driver_profile(&pool.conn, user.id).unwrap().is_some());

    let cleared = AccountLogic::change_role(&mut pool.conn, "malee", None).unwrap();
    assert_eq!(cleared.role, None);
}

#[test]
fn test_authenticate() {
    let mut pool = open_test_db("account_authenticate");
    let user = create_user(&mut pool, "somchai", Some(Role::Driver));

    assert!(AccountLogic::authenticate(&pool.conn, "somchai", "secret").unwrap().is_some());
    assert!(AccountLogic::authenticate(&pool.conn, "somchai", "nope").unwrap().is_none());
    assert!(AccountLogic::authenticate(&pool.conn, "ghost", "secret").unwrap().is_none());

    AccountLogic::set_password(&pool.conn, "somchai", "changed").unwrap();
    assert!(AccountLogic::authenticate(&pool.conn, "somchai", "secret").unwrap().is_none());
    assert!(AccountLogic::authenticate(&pool.conn, "somchai", "changed").unwrap().is_some());

    set_active(&pool.conn, user.id, false).unwrap();
    assert!(AccountLogic::authenticate(&pool.conn, "somchai", "changed").unwrap().is_none());
}

#[test]
fn test_list_users_filters() {
    let mut pool = open_test_db("account_list");
    create_user(&mut pool, "zed", Some(Role::Driver));
    create_user(&mut pool, "anna", Some(Role::Driver));
    create_user(&mut pool, "malee", Some(Role::Operator));

    let all = list_users(&pool.conn, None, None).unwrap();
    let names: Vec<&str> = all.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["anna", "malee", "zed"]);

    let drivers = list_users(&pool.conn, Some(Role::Driver), None).unwrap();
    assert_eq!(drivers.len(), 2);

    let found = list_users(&pool.conn, None, Some("mal")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username, "malee");
}

#[test]
fn test_session_lifecycle() {
    let mut pool = open_test_db("account_session");
    let user = create_user(&mut pool, "somchai", Some(Role::Driver));

    assert!(SessionLogic::login(&pool.conn, "somchai", "bad").unwrap().is_none());

    let (logged, token) = SessionLogic::login(&pool.conn, "somchai", "secret")
        .unwrap()
        .expect("login");
    assert_eq!(logged.id, user.id);

    let current = SessionLogic::current_user(&pool.conn, &token).unwrap().unwrap();
    assert_eq!(current.username, "somchai");

    assert!(SessionLogic::logout(&pool.conn, &token).unwrap());
    assert!(SessionLogic::current_user(&pool.conn, &token).unwrap().is_none());
    assert!(!SessionLogic::logout(&pool.conn, &token).unwrap());
}

#[test]
fn test_login_replaces_previous_session() {
    let mut pool = open_test_db("account_relogin");
    let user = create_user(&mut pool, "somchai", Some(Role::Driver));

    let mut tokens = Vec::new();
    for _ in 0..3 {
        let (_, token) = SessionLogic::login(&pool.conn, "somchai", "secret")
            .unwrap()
            .expect("login");
        tokens.push(token);
    }
    assert_eq!(count_sessions(&pool.conn, user.id).unwrap(), 1);

    assert!(SessionLogic::current_user(&pool.conn, &tokens[0]).unwrap().is_none());
    assert!(SessionLogic::current_user(&pool.conn, &tokens[1]).unwrap().is_none());
    assert!(SessionLogic::current_user(&pool.conn, &tokens[2]).unwrap().is_some());
}
