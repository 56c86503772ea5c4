//! One module per subcommand. Page-backed commands go through the
//! request dispatcher exactly like a browser would.

pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod jobrun;
pub mod log;
pub mod mileage;
pub mod profile;
pub mod reference;
pub mod request;
pub mod session;
pub mod user;

use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::sessions::delete_session;
use crate::errors::{AppError, AppResult};
use crate::ui::pages::render_response;
use crate::web::request::{Method, Request};
use crate::web::response::{Page, Response, SessionUpdate};
use crate::web::route::Route;
use crate::web::{AppContext, dispatch};

/// Open the configured database with its schema up to date.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Dispatch `req` with the stored session token and persist whatever the
/// handler did to the session.
pub(crate) fn send(cfg: &Config, req: Request) -> AppResult<Response> {
    let session_file = cfg.session_file();
    let req = if req.session.is_none() {
        req.with_session(SessionLogic::read_token(&session_file)?)
    } else {
        req
    };

    let mut ctx = AppContext::new(open_db(cfg)?, cfg);
    let resp = dispatch(&mut ctx, &req)?;

    if let Response::Redirect(r) = &resp {
        match &r.session {
            Some(SessionUpdate::Set(token)) => {
                // The stored token may belong to another user.
                if let Some(old) = req.session.as_deref()
                    && old != token.as_str()
                {
                    delete_session(&ctx.pool.conn, old)?;
                }
                SessionLogic::write_token(&session_file, token)?
            }
            Some(SessionUpdate::Clear) => SessionLogic::clear_token(&session_file)?,
            None => {}
        }
    }

    Ok(resp)
}

/// Error message carried by a re-rendered form, if any.
fn form_error(page: &Page) -> Option<&str> {
    match page {
        Page::Login { error }
        | Page::DriverInfo { error, .. }
        | Page::JobRunning { error, .. }
        | Page::MileUpdate { error, .. } => error.as_deref(),
        _ => None,
    }
}

/// Send a request, follow a redirect the way a browser would, and turn
/// refusals into errors so the command exits non-zero.
pub(crate) fn browse(cfg: &Config, req: Request) -> AppResult<()> {
    let resp = send(cfg, req)?;

    match &resp {
        Response::Redirect(r) if r.to == Route::Login && r.session.is_none() => {
            Err(AppError::NotAuthenticated)
        }
        Response::Redirect(r) => {
            render_response(&resp);
            let next = send(cfg, Request::from_target(Method::Get, &r.location())?)?;
            render_response(&next);
            Ok(())
        }
        Response::Render(Page::Forbidden { message }) => Err(AppError::Forbidden(message.clone())),
        Response::Render(page) => {
            render_response(&resp);
            match form_error(page) {
                Some(msg) => Err(AppError::InvalidInput(msg.to_string())),
                None => Ok(()),
            }
        }
        Response::MethodNotAllowed | Response::NotFound => {
            render_response(&resp);
            Err(AppError::Other(format!("request failed with status {}", resp.status())))
        }
    }
}
