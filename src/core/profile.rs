use crate::core::media::{discard_uploads, store_uploads};
use crate::db::log::ttlog_quiet;
use crate::db::profiles::{
    find_driver_profile, set_driver_image, update_admin_profile, update_driver_profile,
    update_operator_profile,
};
use crate::db::reference::find_warehouse;
use crate::errors::{AppError, AppResult};
use crate::models::profile::{DriverImage, DriverProfile, DriverProfileUpdate};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub struct ProfileLogic;

impl ProfileLogic {
    pub fn driver_profile(conn: &Connection, user_id: i64) -> AppResult<DriverProfile> {
        find_driver_profile(conn, user_id)?
            .ok_or_else(|| AppError::NotFound(format!("Driver profile for user {}", user_id)))
    }

    /// Update text fields and store any uploaded images, all or nothing.
    pub fn update_driver(
        conn: &mut Connection,
        media_root: &Path,
        user_id: i64,
        upd: &DriverProfileUpdate,
        images: &[(DriverImage, PathBuf)],
    ) -> AppResult<DriverProfile> {
        if let Some(wid) = upd.warehouse_id
            && find_warehouse(conn, wid)?.is_none()
        {
            return Err(AppError::InvalidInput(format!("Unknown warehouse {}", wid)));
        }
        if let Some(bid) = upd.bank_id {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM banks WHERE id = ?1)",
                [bid],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(AppError::InvalidInput(format!("Unknown bank {}", bid)));
            }
        }

        // copy files first so a bad path fails before anything is written
        let stored = store_uploads(media_root, images, |slot| slot.upload_to())?;
        if let Err(e) = Self::write_driver(conn, user_id, upd, &stored) {
            discard_uploads(media_root, stored.iter().map(|(_, p)| p.as_str()));
            return Err(e);
        }

        ttlog_quiet(
            conn,
            "profile_edit",
            &format!("user {}", user_id),
            &format!("Driver profile updated ({} image(s))", stored.len()),
        );

        Self::driver_profile(conn, user_id)
    }

    fn write_driver(
        conn: &mut Connection,
        user_id: i64,
        upd: &DriverProfileUpdate,
        stored: &[(DriverImage, String)],
    ) -> AppResult<()> {
        let tx = conn.transaction()?;
        if !upd.is_empty() {
            update_driver_profile(&tx, user_id, upd)?;
        }
        for (slot, path) in stored {
            set_driver_image(&tx, user_id, *slot, path)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn update_operator(
        conn: &Connection,
        user_id: i64,
        office_location: Option<&str>,
        extension_number: Option<&str>,
    ) -> AppResult<()> {
        update_operator_profile(conn, user_id, office_location, extension_number)?;
        ttlog_quiet(
            conn,
            "profile_edit",
            &format!("user {}", user_id),
            "Operator profile updated",
        );
        Ok(())
    }

    pub fn update_admin(
        conn: &Connection,
        user_id: i64,
        admin_level: Option<&str>,
        department: Option<&str>,
    ) -> AppResult<()> {
        update_admin_profile(conn, user_id, admin_level, department)?;
        ttlog_quiet(
            conn,
            "profile_edit",
            &format!("user {}", user_id),
            "Admin profile updated",
        );
        Ok(())
    }
}
