use super::require_role;
use crate::core::job_runs::{list_month, upsert_month};
use crate::errors::AppResult;
use crate::models::job_run::{DayEntry, MonthSpec};
use crate::models::role::Role;
use crate::web::AppContext;
use crate::web::form::Form;
use crate::web::request::{Method, Request};
use crate::web::response::{Page, Redirect, Response};
use crate::web::route::Route;
use std::collections::BTreeMap;

const ROUND_PREFIX: &str = "round_info_";
const REMARKS_PREFIX: &str = "remarks_";

/// Collect `round_info_<day>` / `remarks_<day>` fields into per-day entries.
/// A day with only one of the two fields gets "" for the other.
pub fn entries_from_form(form: &Form) -> BTreeMap<u32, DayEntry> {
    let mut entries: BTreeMap<u32, DayEntry> = BTreeMap::new();

    for (key, value) in form.iter() {
        if let Some(day) = key.strip_prefix(ROUND_PREFIX).and_then(|d| d.parse::<u32>().ok()) {
            entries.entry(day).or_default().round_info = value.to_string();
        } else if let Some(day) = key
            .strip_prefix(REMARKS_PREFIX)
            .and_then(|d| d.parse::<u32>().ok())
        {
            entries.entry(day).or_default().remarks = value.to_string();
        }
    }

    entries
}

pub fn job_running(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    if !matches!(req.method, Method::Get | Method::Post) {
        return Ok(Response::MethodNotAllowed);
    }

    let user = match require_role(ctx, req, Role::Driver)? {
        Ok(u) => u,
        Err(resp) => return Ok(resp),
    };

    if req.method == Method::Get {
        let year = req.params.get_or("year", &ctx.default_year).to_string();
        let month = req.params.get_or("month", &ctx.default_month).to_string();
        return render_month(ctx, user.id, year, month, None);
    }

    let year = req.form.get("year").to_string();
    let month = req.form.get("month").to_string();

    let spec = match MonthSpec::parse(&year, &month) {
        Ok(s) => s,
        Err(e) if e.is_validation() => {
            return render_month(ctx, user.id, year, month, Some(e.to_string()));
        }
        Err(e) => return Err(e),
    };

    let entries = entries_from_form(&req.form);
    match upsert_month(&mut ctx.pool.conn, user.id, spec, &entries) {
        Ok(written) => {
            log::info!("{}: {} job run(s) written for {}", user.username, written, spec);
            Ok(Response::Redirect(
                Redirect::to(Route::JobRunning)
                    .with_query("year", &spec.year().to_string())
                    .with_query("month", &spec.month_str()),
            ))
        }
        Err(e) if e.is_validation() => render_month(ctx, user.id, year, month, Some(e.to_string())),
        Err(e) => Err(e),
    }
}

/// Job-running page for the given month; an unparsable month renders an
/// empty list with the validation message.
fn render_month(
    ctx: &AppContext,
    user_id: i64,
    year: String,
    month: String,
    error: Option<String>,
) -> AppResult<Response> {
    let (records, error) = match MonthSpec::parse(&year, &month) {
        Ok(spec) => (list_month(&ctx.pool.conn, user_id, spec)?, error),
        Err(e) if e.is_validation() => (Vec::new(), error.or_else(|| Some(e.to_string()))),
        Err(e) => return Err(e),
    };

    Ok(Response::Render(Page::JobRunning {
        year,
        month,
        records,
        error,
    }))
}
