use crate::cli::parser::{Commands, MileageAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::mileage::MileageImage;
use crate::utils::path::expand_tilde;
use crate::web::form::Form;
use crate::web::request::Request;
use crate::web::route::Route;

use super::browse;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Mileage { action } = cmd else {
        return Ok(());
    };

    match action {
        MileageAction::Add {
            mile,
            mile_image,
            front_image,
            back_image,
            left_image,
            right_image,
        } => {
            let mut req = Request::post(Route::MileUpdate.path(), Form::new().with("mile", mile));
            let images = [
                (MileageImage::Mile, mile_image),
                (MileageImage::Front, front_image),
                (MileageImage::Back, back_image),
                (MileageImage::Left, left_image),
                (MileageImage::Right, right_image),
            ];
            for (slot, path) in images {
                if let Some(p) = path {
                    req = req.with_file(slot.column(), expand_tilde(p));
                }
            }
            browse(cfg, req)
        }
        MileageAction::List => browse(cfg, Request::get(Route::MileUpdate.path())),
    }
}
