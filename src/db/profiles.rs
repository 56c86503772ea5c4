use crate::errors::{AppError, AppResult};
use crate::models::profile::{
    AdminProfile, DriverImage, DriverProfile, DriverProfileUpdate, OperatorProfile, Profile,
};
use crate::models::role::Role;
use crate::models::user::User;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Attach the profile matching `role` to the user if it is missing.
pub fn ensure_profile(conn: &Connection, user_id: i64, role: Role) -> AppResult<()> {
    match role {
        Role::Driver => {
            let now = Local::now().to_rfc3339();
            conn.execute(
                "INSERT OR IGNORE INTO driver_profiles (user_id, created_date, last_updated_date)
                 VALUES (?1, ?2, ?2)",
                params![user_id, now],
            )?;
        }
        Role::Operator => {
            conn.execute(
                "INSERT OR IGNORE INTO operator_profiles (user_id) VALUES (?1)",
                [user_id],
            )?;
        }
        Role::Admin => {
            conn.execute(
                "INSERT OR IGNORE INTO admin_profiles (user_id) VALUES (?1)",
                [user_id],
            )?;
        }
    }
    Ok(())
}

fn map_driver(row: &Row) -> rusqlite::Result<DriverProfile> {
    Ok(DriverProfile {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        warehouse_id: row.get("warehouse_id")?,
        bank_id: row.get("bank_id")?,
        id_card_number: row.get("id_card_number")?,
        id_card_address: row.get("id_card_address")?,
        current_address: row.get("current_address")?,
        phone_number: row.get("phone_number")?,
        bank_account: row.get("bank_account")?,
        car_license: row.get("car_license")?,
        id_card_image: row.get("id_card_image")?,
        driver_license: row.get("driver_license")?,
        photo_with_card: row.get("photo_with_card")?,
        profile_photo: row.get("profile_photo")?,
        created_date: row
            .get::<_, Option<String>>("created_date")?
            .unwrap_or_default(),
        last_updated_date: row
            .get::<_, Option<String>>("last_updated_date")?
            .unwrap_or_default(),
    })
}

pub fn find_driver_profile(conn: &Connection, user_id: i64) -> AppResult<Option<DriverProfile>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM driver_profiles WHERE user_id = ?1")?;
    Ok(stmt.query_row([user_id], map_driver).optional()?)
}

pub fn update_driver_profile(
    conn: &Connection,
    user_id: i64,
    upd: &DriverProfileUpdate,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE driver_profiles
         SET warehouse_id    = COALESCE(?1, warehouse_id),
             bank_id         = COALESCE(?2, bank_id),
             id_card_number  = COALESCE(?3, id_card_number),
             id_card_address = COALESCE(?4, id_card_address),
             current_address = COALESCE(?5, current_address),
             phone_number    = COALESCE(?6, phone_number),
             bank_account    = COALESCE(?7, bank_account),
             car_license     = COALESCE(?8, car_license),
             last_updated_date = ?9
         WHERE user_id = ?10",
        params![
            upd.warehouse_id,
            upd.bank_id,
            upd.id_card_number,
            upd.id_card_address,
            upd.current_address,
            upd.phone_number,
            upd.bank_account,
            upd.car_license,
            Local::now().to_rfc3339(),
            user_id,
        ],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Driver profile for user {}", user_id)));
    }
    Ok(())
}

pub fn set_driver_image(
    conn: &Connection,
    user_id: i64,
    slot: DriverImage,
    path: &str,
) -> AppResult<()> {
    // column name comes from a closed enum, never from input
    let sql = format!(
        "UPDATE driver_profiles SET {} = ?1, last_updated_date = ?2 WHERE user_id = ?3",
        slot.column()
    );
    let changed = conn.execute(&sql, params![path, Local::now().to_rfc3339(), user_id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Driver profile for user {}", user_id)));
    }
    Ok(())
}

pub fn find_operator_profile(conn: &Connection, user_id: i64) -> AppResult<Option<OperatorProfile>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, office_location, extension_number
         FROM operator_profiles WHERE user_id = ?1",
    )?;
    Ok(stmt
        .query_row([user_id], |row| {
            Ok(OperatorProfile {
                id: row.get(0)?,
                user_id: row.get(1)?,
                office_location: row.get(2)?,
                extension_number: row.get(3)?,
            })
        })
        .optional()?)
}

pub fn update_operator_profile(
    conn: &Connection,
    user_id: i64,
    office_location: Option<&str>,
    extension_number: Option<&str>,
) -> AppResult<()> {
    if let Some(ext) = extension_number
        && ext.chars().count() > 10
    {
        return Err(AppError::InvalidInput(format!(
            "Extension number '{}' is longer than 10 characters",
            ext
        )));
    }
    let changed = conn.execute(
        "UPDATE operator_profiles
         SET office_location = COALESCE(?1, office_location),
             extension_number = COALESCE(?2, extension_number)
         WHERE user_id = ?3",
        params![office_location, extension_number, user_id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Operator profile for user {}", user_id)));
    }
    Ok(())
}

pub fn find_admin_profile(conn: &Connection, user_id: i64) -> AppResult<Option<AdminProfile>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, admin_level, department FROM admin_profiles WHERE user_id = ?1",
    )?;
    Ok(stmt
        .query_row([user_id], |row| {
            Ok(AdminProfile {
                id: row.get(0)?,
                user_id: row.get(1)?,
                admin_level: row.get(2)?,
                department: row.get(3)?,
            })
        })
        .optional()?)
}

pub fn update_admin_profile(
    conn: &Connection,
    user_id: i64,
    admin_level: Option<&str>,
    department: Option<&str>,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE admin_profiles
         SET admin_level = COALESCE(?1, admin_level),
             department = COALESCE(?2, department)
         WHERE user_id = ?3",
        params![admin_level, department, user_id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Admin profile for user {}", user_id)));
    }
    Ok(())
}

/// The profile matching the user's current role, if one is attached.
pub fn load_profile(conn: &Connection, user: &User) -> AppResult<Option<Profile>> {
    let profile = match user.role {
        Some(Role::Driver) => find_driver_profile(conn, user.id)?.map(Profile::Driver),
        Some(Role::Operator) => find_operator_profile(conn, user.id)?.map(Profile::Operator),
        Some(Role::Admin) => find_admin_profile(conn, user.id)?.map(Profile::Admin),
        None => None,
    };
    Ok(profile)
}
