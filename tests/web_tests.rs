use chrono::NaiveDate;
use driverlog::core::accounts::AccountLogic;
use driverlog::core::job_runs::list_month;
use driverlog::core::session::SessionLogic;
use driverlog::db::reference::{insert_bank, insert_warehouse};
use driverlog::errors::AppError;
use driverlog::models::job_run::MonthSpec;
use driverlog::models::role::Role;
use driverlog::models::user::NewUser;
use driverlog::web::handlers::auth::INVALID_LOGIN;
use driverlog::web::handlers::job_running::entries_from_form;
use driverlog::web::request::{Method, Request};
use driverlog::web::response::{Page, Redirect, Response, SessionUpdate};
use driverlog::web::route::Route;
use driverlog::web::form::Form;
use driverlog::web::{AppContext, dispatch};

mod common;
use common::{temp_image, test_context};

fn add_user(ctx: &mut AppContext, username: &str, role: Option<Role>) {
    AccountLogic::create_user(
        &mut ctx.pool.conn,
        NewUser {
            username: username.to_string(),
            password: "secret".to_string(),
            first_name: "Somchai".to_string(),
            role,
            ..Default::default()
        },
    )
    .expect("create user");
}

fn login(ctx: &AppContext, username: &str) -> Option<String> {
    SessionLogic::login(&ctx.pool.conn, username, "secret")
        .expect("login")
        .map(|(_, token)| token)
}

fn driver_context(name: &str) -> (AppContext, Option<String>) {
    let mut ctx = test_context(name).with_today(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    add_user(&mut ctx, "somchai", Some(Role::Driver));
    let token = login(&ctx, "somchai");
    (ctx, token)
}

fn month_form(year: &str, month: &str) -> Form {
    Form::new().with("year", year).with("month", month)
}

#[test]
fn test_routes_resolve() {
    assert_eq!(Route::resolve("/job-running/"), Some(Route::JobRunning));
    assert_eq!(Route::resolve("/job-running"), Some(Route::JobRunning));
    assert_eq!(Route::resolve("/nowhere/"), None);
    assert_eq!(Route::JobRunning.name(), "job_running");
    assert_eq!(Route::OperatorMenu.name(), "operator_menu");
}

#[test]
fn test_form_parse() {
    let form = Form::parse("round_info_1=R+1&remarks_1=a%2Fb&year=2024").unwrap();
    assert_eq!(form.get("round_info_1"), "R 1");
    assert_eq!(form.get("remarks_1"), "a/b");
    assert_eq!(form.get("missing"), "");
    assert!(Form::parse("bad=%ZZ").unwrap_err().is_validation());
}

#[test]
fn test_redirect_query_is_encoded() {
    let next = "/job running/?year=2024&month=02+x";
    let redirect = Redirect::to(Route::Login).with_query("next", next);
    assert_eq!(
        redirect.location(),
        "/login/?next=/job+running/%3Fyear%3D2024%26month%3D02%2Bx"
    );

    let req = Request::from_target(Method::Get, &redirect.location()).unwrap();
    assert_eq!(req.path, "/login/");
    assert_eq!(req.params.get("next"), next);
    assert_eq!(req.params.get("month"), "");
}

#[test]
fn test_entries_from_form() {
    let form = Form::new()
        .with("round_info_1", "R1")
        .with("remarks_1", "ok")
        .with("remarks_2", "only remarks")
        .with("round_info_x", "ignored")
        .with("year", "2024");
    let entries = entries_from_form(&form);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[&1].round_info, "R1");
    assert_eq!(entries[&2].round_info, "");
    assert_eq!(entries[&2].remarks, "only remarks");
}

#[test]
fn test_unknown_path_is_not_found() {
    let mut ctx = test_context("web_not_found");
    let resp = dispatch(&mut ctx, &Request::get("/admin/")).unwrap();
    assert!(matches!(resp, Response::NotFound));
    assert_eq!(resp.status(), 404);
}

#[test]
fn test_login_redirects_by_role() {
    let mut ctx = test_context("web_login_roles");
    add_user(&mut ctx, "somchai", Some(Role::Driver));
    add_user(&mut ctx, "malee", Some(Role::Operator));
    add_user(&mut ctx, "guest", None);

    for (username, expected) in [
        ("somchai", Route::UserMenu),
        ("malee", Route::OperatorMenu),
        ("guest", Route::UserMenu),
    ] {
        let form = Form::new().with("username", username).with("password", "secret");
        let resp = dispatch(&mut ctx, &Request::post("/login/", form)).unwrap();
        match resp {
            Response::Redirect(Redirect {
                to,
                session: Some(SessionUpdate::Set(_)),
                ..
            }) => assert_eq!(to, expected),
            other => panic!("unexpected response for {username}: {other:?}"),
        }
    }
}

#[test]
fn test_login_failure_renders_error() {
    let mut ctx = test_context("web_login_failure");
    add_user(&mut ctx, "somchai", Some(Role::Driver));

    let form = Form::new().with("username", "somchai").with("password", "wrong");
    let resp = dispatch(&mut ctx, &Request::post("/login/", form)).unwrap();
    match resp {
        Response::Render(Page::Login { error }) => assert_eq!(error.as_deref(), Some(INVALID_LOGIN)),
        other => panic!("unexpected response: {other:?}"),
    }

    let resp = dispatch(&mut ctx, &Request::new(Method::Delete, "/login/")).unwrap();
    assert_eq!(resp.status(), 405);
}

#[test]
fn test_logout_clears_session() {
    let (mut ctx, token) = driver_context("web_logout");
    let token = token.expect("token");

    let resp = dispatch(&mut ctx, &Request::get("/logout/").with_session(Some(token.clone()))).unwrap();
    match resp {
        Response::Redirect(r) => {
            assert_eq!(r.to, Route::Login);
            assert_eq!(r.session, Some(SessionUpdate::Clear));
        }
        other => panic!("unexpected response: {other:?}"),
    }
    assert!(SessionLogic::current_user(&ctx.pool.conn, &token).unwrap().is_none());
}

#[test]
fn test_job_running_requires_login() {
    let mut ctx = test_context("web_requires_login");
    let resp = dispatch(&mut ctx, &Request::get("/job-running/")).unwrap();
    match resp {
        Response::Redirect(r) => {
            assert_eq!(r.to, Route::Login);
            assert_eq!(r.location(), "/login/?next=/job-running/");
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn test_job_running_forbidden_for_operator() {
    let mut ctx = test_context("web_forbidden");
    add_user(&mut ctx, "malee", Some(Role::Operator));
    let token = login(&ctx, "malee");

    let resp = dispatch(&mut ctx, &Request::get("/job-running/").with_session(token)).unwrap();
    assert!(matches!(resp, Response::Render(Page::Forbidden { .. })));
    assert_eq!(resp.status(), 403);
}

#[test]
fn test_job_running_rejects_other_methods() {
    let (mut ctx, token) = driver_context("web_405");
    for method in [Method::Put, Method::Patch, Method::Delete] {
        let req = Request::new(method, "/job-running/").with_session(token.clone());
        let resp = dispatch(&mut ctx, &req).unwrap();
        assert!(matches!(resp, Response::MethodNotAllowed));
    }
}

#[test]
fn test_job_running_get_uses_default_month() {
    let (mut ctx, token) = driver_context("web_default_month");
    let resp = dispatch(&mut ctx, &Request::get("/job-running/").with_session(token)).unwrap();
    match resp {
        Response::Render(Page::JobRunning {
            year,
            month,
            records,
            error,
        }) => {
            assert_eq!(year, "2024");
            assert_eq!(month, "01");
            assert!(records.is_empty());
            assert!(error.is_none());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn test_job_running_submit_redirects_to_month() {
    let (mut ctx, token) = driver_context("web_submit");
    let form = month_form("2024", "2")
        .with("round_info_29", "R29")
        .with("remarks_29", "leap")
        .with("round_info_30", "R30");

    let resp = dispatch(&mut ctx, &Request::post("/job-running/", form).with_session(token.clone())).unwrap();
    match &resp {
        Response::Redirect(r) => {
            assert_eq!(r.to, Route::JobRunning);
            assert_eq!(r.location(), "/job-running/?year=2024&month=02");
        }
        other => panic!("unexpected response: {other:?}"),
    }

    let req = Request::from_target(Method::Get, "/job-running/?year=2024&month=02")
        .unwrap()
        .with_session(token);
    match dispatch(&mut ctx, &req).unwrap() {
        Response::Render(Page::JobRunning { records, .. }) => {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].date_str(), "2024-02-29");
            assert_eq!(records[0].remarks_str(), "leap");
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn test_job_running_invalid_month_rerenders() {
    let (mut ctx, token) = driver_context("web_bad_month");
    let form = month_form("2024", "13").with("round_info_1", "R1");

    let resp = dispatch(&mut ctx, &Request::post("/job-running/", form).with_session(token)).unwrap();
    match resp {
        Response::Render(Page::JobRunning { error, records, .. }) => {
            assert!(error.is_some());
            assert!(records.is_empty());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn test_job_running_out_of_range_year_rerenders() {
    let (mut ctx, token) = driver_context("web_huge_year");

    let req = Request::from_target(Method::Get, "/job-running/?year=300000&month=01")
        .unwrap()
        .with_session(token.clone());
    match dispatch(&mut ctx, &req).unwrap() {
        Response::Render(Page::JobRunning { year, error, records, .. }) => {
            assert_eq!(year, "300000");
            assert!(error.unwrap().contains("out of range"));
            assert!(records.is_empty());
        }
        other => panic!("unexpected response: {other:?}"),
    }

    let form = month_form("300000", "01").with("round_info_1", "R1");
    let resp = dispatch(&mut ctx, &Request::post("/job-running/", form).with_session(token)).unwrap();
    assert!(matches!(
        resp,
        Response::Render(Page::JobRunning { error: Some(_), .. })
    ));
}

#[test]
fn test_job_running_store_failure_is_an_error() {
    let (mut ctx, token) = driver_context("web_store_failure");
    ctx.pool
        .conn
        .execute_batch(
            "CREATE TRIGGER reject_aug_2 BEFORE INSERT ON job_runs
             WHEN NEW.date = '2024-08-02'
             BEGIN SELECT RAISE(ABORT, 'store unavailable'); END;",
        )
        .unwrap();

    let form = month_form("2024", "08")
        .with("round_info_1", "R1")
        .with("round_info_2", "R2");
    let result = dispatch(&mut ctx, &Request::post("/job-running/", form).with_session(token));
    assert!(matches!(result, Err(AppError::Db(_))));

    let user = AccountLogic::require(&ctx.pool.conn, "somchai").unwrap();
    let aug = MonthSpec::new(2024, 8).unwrap();
    assert!(list_month(&ctx.pool.conn, user.id, aug).unwrap().is_empty());
}

#[test]
fn test_job_running_too_long_round_writes_nothing() {
    let (mut ctx, token) = driver_context("web_long_round");
    let long = "R".repeat(31);
    let form = month_form("2024", "03")
        .with("round_info_1", "R1")
        .with("round_info_2", &long);

    let resp = dispatch(&mut ctx, &Request::post("/job-running/", form).with_session(token)).unwrap();
    assert!(matches!(
        resp,
        Response::Render(Page::JobRunning { error: Some(_), .. })
    ));

    let user = AccountLogic::require(&ctx.pool.conn, "somchai").unwrap();
    let march = MonthSpec::new(2024, 3).unwrap();
    assert!(list_month(&ctx.pool.conn, user.id, march).unwrap().is_empty());
}

#[test]
fn test_user_menu_links() {
    let (mut ctx, token) = driver_context("web_user_menu");
    match dispatch(&mut ctx, &Request::get("/user-menu/").with_session(token)).unwrap() {
        Response::Render(Page::Menu { links, user, .. }) => {
            assert_eq!(user.username, "somchai");
            assert!(links.contains(&Route::JobRunning));
            assert!(links.contains(&Route::Logout));
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn test_driver_info_update() {
    let (mut ctx, token) = driver_context("web_driver_info");
    let wid = insert_warehouse(&ctx.pool.conn, "Bangna DC", None).unwrap();
    insert_bank(&ctx.pool.conn, "KBANK", None, Some("Kasikorn Bank")).unwrap();
    let photo = temp_image("web_driver_info");

    let form = Form::new()
        .with("warehouse", &wid.to_string())
        .with("bank", "KBANK")
        .with("phone_number", " 0812345678 ")
        .with("car_license", "1กข 1234");
    let req = Request::post("/driver-info/", form)
        .with_session(token.clone())
        .with_file("profile_photo", &photo);
    let resp = dispatch(&mut ctx, &req).unwrap();
    assert!(matches!(resp, Response::Redirect(Redirect { to: Route::DriverInfo, .. })));

    match dispatch(&mut ctx, &Request::get("/driver-info/").with_session(token)).unwrap() {
        Response::Render(Page::DriverInfo { profile, .. }) => {
            assert_eq!(profile.warehouse_id, Some(wid));
            assert!(profile.bank_id.is_some());
            assert_eq!(profile.phone_number.as_deref(), Some("0812345678"));
            let stored = profile.profile_photo.expect("photo path");
            assert!(stored.starts_with("driver_info/"));
            assert!(ctx.media_root.join(&stored).is_file());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn test_driver_info_unknown_bank_rerenders() {
    let (mut ctx, token) = driver_context("web_driver_info_bad_bank");
    let form = Form::new().with("bank", "NOPE").with("phone_number", "1");
    let resp = dispatch(&mut ctx, &Request::post("/driver-info/", form).with_session(token)).unwrap();
    match resp {
        Response::Render(Page::DriverInfo { error, profile, .. }) => {
            assert!(error.is_some());
            assert_eq!(profile.phone_number, None);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn test_mile_update_and_dashboard() {
    let (mut ctx, token) = driver_context("web_mileage");
    let front = temp_image("web_mileage_front");

    let req = Request::post("/mile-update/", Form::new().with("mile", "12345"))
        .with_session(token.clone())
        .with_file("front_image", &front);
    let resp = dispatch(&mut ctx, &req).unwrap();
    assert!(matches!(resp, Response::Redirect(Redirect { to: Route::MileUpdate, .. })));

    let bad = Request::post("/mile-update/", Form::new().with("mile", "-5")).with_session(token.clone());
    match dispatch(&mut ctx, &bad).unwrap() {
        Response::Render(Page::MileUpdate { entries, error }) => {
            assert!(error.is_some());
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].mile, 12345);
            assert_eq!(entries[0].update_date.to_string(), "2024-02-15");
            assert!(entries[0].front_image.as_deref().unwrap().starts_with("vehicle_images/front/"));
        }
        other => panic!("unexpected response: {other:?}"),
    }

    match dispatch(&mut ctx, &Request::get("/driver-dashboard/").with_session(token)).unwrap() {
        Response::Render(Page::DriverDashboard {
            label,
            month,
            latest_mileage,
            ..
        }) => {
            assert_eq!(label, "Somchai");
            assert_eq!(month, "2024-02");
            assert_eq!(latest_mileage.map(|m| m.mile), Some(12345));
        }
        other => panic!("unexpected response: {other:?}"),
    }
}
