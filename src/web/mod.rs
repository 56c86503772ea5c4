//! Request/response layer: named routes, typed pages and the handlers
//! behind them. Nothing here knows about HTTP servers or templates; the CLI
//! builds a `Request`, calls `dispatch` and renders the `Response`.

pub mod form;
pub mod handlers;
pub mod request;
pub mod response;
pub mod route;

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::NaiveDate;
use request::Request;
use response::Response;
use route::Route;
use std::path::PathBuf;

/// Everything a handler may touch while serving one request.
pub struct AppContext {
    pub pool: DbPool,
    pub media_root: PathBuf,
    pub default_year: String,
    pub default_month: String,
    pub today: NaiveDate,
}

impl AppContext {
    pub fn new(pool: DbPool, cfg: &Config) -> Self {
        Self {
            pool,
            media_root: PathBuf::from(&cfg.media_root),
            default_year: cfg.default_year.clone(),
            default_month: cfg.default_month.clone(),
            today: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// Route a request to its handler.
pub fn dispatch(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    let Some(route) = Route::resolve(&req.path) else {
        log::debug!("{} {} -> 404", req.method, req.path);
        return Ok(Response::NotFound);
    };

    let response = match route {
        Route::Login => handlers::auth::login(ctx, req),
        Route::Logout => handlers::auth::logout(ctx, req),
        Route::OperatorMenu => handlers::auth::operator_menu(ctx, req),
        Route::UserMenu => handlers::auth::user_menu(ctx, req),
        Route::DriverInfo => handlers::driver::driver_info(ctx, req),
        Route::DriverDashboard => handlers::driver::driver_dashboard(ctx, req),
        Route::JobRunning => handlers::job_running::job_running(ctx, req),
        Route::MileUpdate => handlers::mileage::mile_update(ctx, req),
    }?;

    log::debug!("{} {} -> {}", req.method, route, response.status());
    Ok(response)
}
