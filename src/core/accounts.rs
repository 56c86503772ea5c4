use crate::core::password::{hash_password, verify_password};
use crate::db::log::ttlog_quiet;
use crate::db::profiles::ensure_profile;
use crate::db::users::{
    find_user_by_id, find_user_by_username, insert_user, update_password, update_role,
};
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{NewUser, User};
use rusqlite::Connection;

/// Lower-case the domain part of an email address; the local part is kept
/// as typed.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

pub struct AccountLogic;

impl AccountLogic {
    /// Create an account and attach the profile of its role.
    pub fn create_user(conn: &mut Connection, new: NewUser) -> AppResult<User> {
        let username = new.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::InvalidInput("The Username field must be set".into()));
        }
        if username.chars().count() > 150 {
            return Err(AppError::InvalidInput(
                "Username is longer than 150 characters".into(),
            ));
        }
        if find_user_by_username(conn, &username)?.is_some() {
            return Err(AppError::InvalidInput(format!(
                "A user with username '{}' already exists",
                username
            )));
        }

        let new = NewUser {
            username,
            email: normalize_email(&new.email),
            ..new
        };
        let hash = hash_password(&new.password);

        let tx = conn.transaction()?;
        let id = insert_user(&tx, &new, &hash)?;
        if let Some(role) = new.role {
            ensure_profile(&tx, id, role)?;
        }
        tx.commit()?;

        ttlog_quiet(
            conn,
            "user_add",
            &new.username,
            &format!(
                "Created user with role {}",
                new.role.map(|r| r.to_db_str()).unwrap_or("none")
            ),
        );

        find_user_by_id(conn, id)?.ok_or_else(|| AppError::NotFound(format!("User {}", id)))
    }

    /// Staff account with the admin role.
    pub fn create_superuser(conn: &mut Connection, new: NewUser) -> AppResult<User> {
        Self::create_user(
            conn,
            NewUser {
                is_staff: true,
                role: Some(Role::Admin),
                ..new
            },
        )
    }

    /// Move a user to another role, attaching the new role's profile.
    /// Profiles of the previous role are kept.
    pub fn change_role(conn: &mut Connection, username: &str, role: Option<Role>) -> AppResult<User> {
        let user = Self::require(conn, username)?;

        let tx = conn.transaction()?;
        update_role(&tx, user.id, role)?;
        if let Some(r) = role {
            ensure_profile(&tx, user.id, r)?;
        }
        tx.commit()?;

        ttlog_quiet(
            conn,
            "user_role",
            username,
            &format!(
                "Role changed to {}",
                role.map(|r| r.to_db_str()).unwrap_or("none")
            ),
        );
        Self::require(conn, username)
    }

    pub fn set_password(conn: &Connection, username: &str, password: &str) -> AppResult<()> {
        let user = Self::require(conn, username)?;
        update_password(conn, user.id, &hash_password(password))?;
        ttlog_quiet(conn, "user_passwd", username, "Password changed");
        Ok(())
    }

    /// The active user matching the credentials, if any.
    pub fn authenticate(conn: &Connection, username: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = find_user_by_username(conn, username.trim())? else {
            return Ok(None);
        };
        if !user.is_active || !verify_password(password, &user.password_hash) {
            return Ok(None);
        }
        Ok(Some(user))
    }

    pub fn require(conn: &Connection, username: &str) -> AppResult<User> {
        find_user_by_username(conn, username)?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", username)))
    }
}
