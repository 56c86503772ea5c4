use crate::core::media::{discard_uploads, store_uploads};
use crate::db::log::ttlog_quiet;
use crate::db::mileage::{insert_mileage, load_mileage};
use crate::db::profiles::find_driver_profile;
use crate::errors::{AppError, AppResult};
use crate::models::job_run::MonthSpec;
use crate::models::mileage::{Mileage, MileageImage, NewMileage};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub struct MileageLogic;

impl MileageLogic {
    /// Parse a submitted odometer reading.
    pub fn parse_mile(raw: &str) -> AppResult<u32> {
        raw.trim().parse::<u32>().map_err(|_| {
            AppError::InvalidInput(format!(
                "Mileage must be a non-negative whole number, got '{}'",
                raw.trim()
            ))
        })
    }

    /// Record a reading for the driver's vehicle, dated `today`.
    pub fn add(
        conn: &Connection,
        media_root: &Path,
        user_id: i64,
        mile: u32,
        images: &[(MileageImage, PathBuf)],
        today: NaiveDate,
    ) -> AppResult<i64> {
        let profile = find_driver_profile(conn, user_id)?
            .ok_or_else(|| AppError::NotFound(format!("Driver profile for user {}", user_id)))?;

        let mut entry = NewMileage {
            mile,
            ..Default::default()
        };
        let stored = store_uploads(media_root, images, |slot| slot.upload_to())?;
        for (slot, path) in &stored {
            entry.set_image(*slot, path.clone());
        }

        let id = match insert_mileage(conn, profile.id, &entry, &today) {
            Ok(id) => id,
            Err(e) => {
                discard_uploads(media_root, stored.iter().map(|(_, p)| p.as_str()));
                return Err(e);
            }
        };
        ttlog_quiet(
            conn,
            "mileage_add",
            profile.car_license.as_deref().unwrap_or("-"),
            &format!("Reading {} on {}", mile, today),
        );
        Ok(id)
    }

    pub fn list(conn: &Connection, user_id: i64, month: Option<MonthSpec>) -> AppResult<Vec<Mileage>> {
        let Some(profile) = find_driver_profile(conn, user_id)? else {
            return Ok(Vec::new());
        };
        let range = match month {
            Some(m) => Some((m.first_day()?, m.last_day()?)),
            None => None,
        };
        load_mileage(conn, profile.id, range)
    }
}
