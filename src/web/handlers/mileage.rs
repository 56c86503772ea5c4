use super::require_role;
use crate::core::mileage::MileageLogic;
use crate::errors::{AppError, AppResult};
use crate::models::mileage::MileageImage;
use crate::models::role::Role;
use crate::web::AppContext;
use crate::web::request::{Method, Request};
use crate::web::response::{Page, Response};
use crate::web::route::Route;
use std::path::PathBuf;

fn uploaded_images(req: &Request) -> AppResult<Vec<(MileageImage, PathBuf)>> {
    req.files
        .iter()
        .map(|f| {
            MileageImage::from_field(&f.field)
                .map(|slot| (slot, f.path.clone()))
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown image field '{}'", f.field)))
        })
        .collect()
}

fn submit(ctx: &AppContext, req: &Request, user_id: i64) -> AppResult<i64> {
    let mile = MileageLogic::parse_mile(req.form.get("mile"))?;
    let images = uploaded_images(req)?;
    MileageLogic::add(&ctx.pool.conn, &ctx.media_root, user_id, mile, &images, ctx.today)
}

pub fn mile_update(ctx: &mut AppContext, req: &Request) -> AppResult<Response> {
    if !matches!(req.method, Method::Get | Method::Post) {
        return Ok(Response::MethodNotAllowed);
    }

    let user = match require_role(ctx, req, Role::Driver)? {
        Ok(u) => u,
        Err(resp) => return Ok(resp),
    };

    let error = if req.method == Method::Post {
        match submit(ctx, req, user.id) {
            Ok(_) => return Ok(Response::redirect(Route::MileUpdate)),
            Err(e) if e.is_validation() => Some(e.to_string()),
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    Ok(Response::Render(Page::MileUpdate {
        entries: MileageLogic::list(&ctx.pool.conn, user.id, None)?,
        error,
    }))
}
