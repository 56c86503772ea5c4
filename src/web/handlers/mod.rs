pub mod auth;
pub mod driver;
pub mod job_running;
pub mod mileage;

use super::AppContext;
use super::request::Request;
use super::response::{Page, Redirect, Response};
use super::route::Route;
use crate::core::session::SessionLogic;
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::models::user::User;

/// The user behind the request's session token, if any.
pub(crate) fn current_user(ctx: &AppContext, req: &Request) -> AppResult<Option<User>> {
    match &req.session {
        Some(token) => SessionLogic::current_user(&ctx.pool.conn, token),
        None => Ok(None),
    }
}

/// Logged-in user, or a redirect to the login page.
pub(crate) fn require_login(ctx: &AppContext, req: &Request) -> AppResult<Result<User, Response>> {
    Ok(current_user(ctx, req)?.ok_or_else(|| {
        Response::Redirect(Redirect::to(Route::Login).with_query("next", req.path.as_str()))
    }))
}

/// Logged-in user holding `role`, or the response to send instead.
pub(crate) fn require_role(
    ctx: &AppContext,
    req: &Request,
    role: Role,
) -> AppResult<Result<User, Response>> {
    let user = match require_login(ctx, req)? {
        Ok(u) => u,
        Err(resp) => return Ok(Err(resp)),
    };
    if user.has_role(role) {
        Ok(Ok(user))
    } else {
        Ok(Err(Response::Render(Page::Forbidden {
            message: format!("This page is only available to the {} role.", role.to_db_str()),
        })))
    }
}
