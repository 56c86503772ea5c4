use super::require_role;
use crate::core::job_runs::list_month;
use crate::core::profile::ProfileLogic;
use crate::db::mileage::latest_mileage;
use crate::db::reference::find_bank_by_code;
use crate::errors::{AppError, AppResult};
use crate::models::job_run::MonthSpec;
use crate::models::profile::{DriverImage, DriverProfile, DriverProfileUpdate};
use crate::models::role::Role;
use crate::models::user::User;
use crate::web::AppContext;
use crate::web::form::Form;
use crate::web::request::{Method, Request};
use crate::web::response::{Page, Response};
use crate::web::route::Route;
use chrono::Datelike;
use std::path::PathBuf;

const TEXT_FIELDS: [&str; 6] = [
    "id_card_number",
    "id_card_address",
    "current_address",
    "phone_number",
    "bank_account",
    "car_license",
];

fn text_field(form: &Form, key: &str) -> Option<String> {
    form.get_opt(key).map(|v| v.trim().to_string())
}

/// Turn the submitted form into a profile update. Only fields present in the
/// form are changed.
fn profile_update_from_form(ctx: &AppContext, form: &Form) -> AppResult<DriverProfileUpdate> {
    let warehouse_id = match form.get_opt("warehouse").map(str::trim) {
        Some("") | None => None,
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            AppError::InvalidInput(format!("Invalid warehouse id '{}'", raw))
        })?),
    };

    let bank_id = match form.get_opt("bank").map(str::trim) {
        Some("") | None => None,
        Some(code) => Some(
            find_bank_by_code(&ctx.pool.conn, code)?
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown bank code '{}'", code)))?
                .id,
        ),
    };

    let [id_card_number, id_card_address, current_address, phone_number, bank_account, car_license] =
        TEXT_FIELDS.map(|k| text_field(form, k));

    Ok(DriverProfileUpdate {
        warehouse_id,
        bank_id,
        id_card_number,
        id_card_address,
        current_address,
        phone_number,
        bank_account,
        car_license,
    })
}

fn uploaded_images(req: &Request) -> AppResult<Vec<(DriverImage, PathBuf)>> {
    req.files
        .iter()
        .map(|f| {
            DriverImage::from_field(&f.field)
                .map(|slot| (slot, f.path.clone()))
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown image field '{}'", f.field)))
        })
        .collect()
}

fn apply_update(ctx: &mut AppContext, req: &Request, user_id: i64) -> AppResult<DriverProfile> {
    let upd = profile_update_from_form(ctx, &req.form)?;
    let images = uploaded_images(req)?;
    ProfileLogic::update_driver(&mut ctx.pool.conn, &ctx.media_root, user_id, &upd, &images)
}

fn render_info(user: User, profile: DriverProfile, error: Option<String>) -> Response {
    Response::Render(Page::DriverInfo {
        user,
        profile,
        error,
    })
}

pub fn driver_info(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    if !matches!(req.method, Method::Get | Method::Post) {
        return Ok(Response::MethodNotAllowed);
    }

    let user = match require_role(ctx, req, Role::Driver)? {
        Ok(u) => u,
        Err(resp) => return Ok(resp),
    };

    if req.method == Method::Get {
        let profile = ProfileLogic::driver_profile(&ctx.pool.conn, user.id)?;
        return Ok(render_info(user, profile, None));
    }

    match apply_update(ctx, req, user.id) {
        Ok(_) => Ok(Response::redirect(Route::DriverInfo)),
        Err(e) if e.is_validation() => {
            let profile = ProfileLogic::driver_profile(&ctx.pool.conn, user.id)?;
            Ok(render_info(user, profile, Some(e.to_string())))
        }
        Err(e) => Err(e),
    }
}

pub fn driver_dashboard(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    if req.method != Method::Get {
        return Ok(Response::MethodNotAllowed);
    }

    let user = match require_role(ctx, req, Role::Driver)? {
        Ok(u) => u,
        Err(resp) => return Ok(resp),
    };

    let month = MonthSpec::new(ctx.today.year(), ctx.today.month())?;
    let profile = ProfileLogic::driver_profile(&ctx.pool.conn, user.id)?;

    Ok(Response::Render(Page::DriverDashboard {
        label: DriverProfile::label(&user.first_name, &user.username),
        month: month.to_string(),
        job_runs: list_month(&ctx.pool.conn, user.id, month)?,
        latest_mileage: latest_mileage(&ctx.pool.conn, profile.id)?,
    }))
}
