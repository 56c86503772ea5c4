use crate::cli::parser::{Commands, ProfileAction};
use crate::config::Config;
use crate::core::accounts::AccountLogic;
use crate::core::profile::ProfileLogic;
use crate::db::profiles::load_profile;
use crate::db::reference::find_bank_by_code;
use crate::errors::{AppError, AppResult};
use crate::models::profile::{
    AdminProfile, DriverImage, DriverProfile, DriverProfileUpdate, OperatorProfile, Profile,
};
use crate::models::role::Role;
use crate::models::user::User;
use crate::ui::messages::{header, success, warning};
use crate::ui::pages::print_driver_profile;
use crate::utils::formatting::or_dash;
use crate::utils::path::expand_tilde;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::open_db;

fn show(conn: &Connection, user: &User) -> AppResult<()> {
    match load_profile(conn, user)? {
        Some(Profile::Driver(p)) => {
            header(DriverProfile::label(&user.first_name, &user.username));
            print_driver_profile(&p);
        }
        Some(Profile::Operator(p)) => {
            header(OperatorProfile::label(&user.username));
            println!("{:<16}: {}", "Office", or_dash(p.office_location.as_deref()));
            println!("{:<16}: {}", "Extension", or_dash(p.extension_number.as_deref()));
        }
        Some(Profile::Admin(p)) => {
            header(AdminProfile::label(&user.username));
            println!("{:<16}: {}", "Admin level", or_dash(p.admin_level.as_deref()));
            println!("{:<16}: {}", "Department", or_dash(p.department.as_deref()));
        }
        None => warning(format!("User '{}' has no profile.", user.username)),
    }
    Ok(())
}

fn image_args(pairs: [(DriverImage, &Option<String>); 4]) -> Vec<(DriverImage, PathBuf)> {
    pairs
        .into_iter()
        .filter_map(|(slot, p)| p.as_deref().map(|p| (slot, expand_tilde(p))))
        .collect()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Profile { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_db(cfg)?;

    match action {
        ProfileAction::Show { username } => {
            let user = AccountLogic::require(&pool.conn, username)?;
            show(&pool.conn, &user)?;
        }

        ProfileAction::Set {
            username,
            warehouse,
            bank,
            id_card_number,
            id_card_address,
            current_address,
            phone,
            bank_account,
            car_license,
            id_card_image,
            driver_license,
            photo_with_card,
            profile_photo,
            office_location,
            extension_number,
            admin_level,
            department,
        } => {
            let user = AccountLogic::require(&pool.conn, username)?;

            match user.role {
                Some(Role::Driver) => {
                    let bank_id = match bank {
                        Some(code) => Some(
                            find_bank_by_code(&pool.conn, code)?
                                .ok_or_else(|| {
                                    AppError::InvalidInput(format!("Unknown bank code '{}'", code))
                                })?
                                .id,
                        ),
                        None => None,
                    };
                    let upd = DriverProfileUpdate {
                        warehouse_id: *warehouse,
                        bank_id,
                        id_card_number: id_card_number.clone(),
                        id_card_address: id_card_address.clone(),
                        current_address: current_address.clone(),
                        phone_number: phone.clone(),
                        bank_account: bank_account.clone(),
                        car_license: car_license.clone(),
                    };
                    let images = image_args([
                        (DriverImage::IdCard, id_card_image),
                        (DriverImage::DriverLicense, driver_license),
                        (DriverImage::PhotoWithCard, photo_with_card),
                        (DriverImage::ProfilePhoto, profile_photo),
                    ]);
                    ProfileLogic::update_driver(
                        &mut pool.conn,
                        Path::new(&cfg.media_root),
                        user.id,
                        &upd,
                        &images,
                    )?;
                }
                Some(Role::Operator) => ProfileLogic::update_operator(
                    &pool.conn,
                    user.id,
                    office_location.as_deref(),
                    extension_number.as_deref(),
                )?,
                Some(Role::Admin) => ProfileLogic::update_admin(
                    &pool.conn,
                    user.id,
                    admin_level.as_deref(),
                    department.as_deref(),
                )?,
                None => {
                    return Err(AppError::NotFound(format!("Profile of '{}'", username)));
                }
            }

            success(format!("Profile of '{}' updated", username));
            show(&pool.conn, &user)?;
        }
    }

    Ok(())
}
