use super::{require_login, require_role};
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::models::user::User;
use crate::web::AppContext;
use crate::web::request::{Method, Request};
use crate::web::response::{Page, Redirect, Response, SessionUpdate};
use crate::web::route::Route;

pub const INVALID_LOGIN: &str = "Invalid username or password.";

/// Where a user lands after logging in.
pub fn landing_route(user: &User) -> Route {
    if user.has_role(Role::Operator) {
        Route::OperatorMenu
    } else {
        Route::UserMenu
    }
}

pub fn login(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    match req.method {
        Method::Get => Ok(Response::Render(Page::Login { error: None })),
        Method::Post => {
            let username = req.form.get("username");
            let password = req.form.get("password");

            match SessionLogic::login(&ctx.pool.conn, username, password)? {
                Some((user, token)) => Ok(Response::Redirect(
                    Redirect::to(landing_route(&user)).with_session(SessionUpdate::Set(token)),
                )),
                None => Ok(Response::Render(Page::Login {
                    error: Some(INVALID_LOGIN.to_string()),
                })),
            }
        }
        _ => Ok(Response::MethodNotAllowed),
    }
}

pub fn logout(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    if !matches!(req.method, Method::Get | Method::Post) {
        return Ok(Response::MethodNotAllowed);
    }
    if let Some(token) = &req.session {
        SessionLogic::logout(&ctx.pool.conn, token)?;
    }
    Ok(Response::Redirect(
        Redirect::to(Route::Login).with_session(SessionUpdate::Clear),
    ))
}

pub fn operator_menu(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    if req.method != Method::Get {
        return Ok(Response::MethodNotAllowed);
    }
    let user = match require_role(ctx, req, Role::Operator)? {
        Ok(u) => u,
        Err(resp) => return Ok(resp),
    };
    Ok(Response::Render(Page::Menu {
        title: "Operator menu".to_string(),
        user,
        links: vec![Route::Logout],
    }))
}

pub fn user_menu(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    if req.method != Method::Get {
        return Ok(Response::MethodNotAllowed);
    }
    let user = match require_login(ctx, req)? {
        Ok(u) => u,
        Err(resp) => return Ok(resp),
    };
    let links = if user.has_role(Role::Driver) {
        vec![
            Route::DriverDashboard,
            Route::DriverInfo,
            Route::JobRunning,
            Route::MileUpdate,
            Route::Logout,
        ]
    } else {
        vec![Route::Logout]
    };
    Ok(Response::Render(Page::Menu {
        title: "Menu".to_string(),
        user,
        links,
    }))
}
