//! Login sessions. The token plays the part of a session cookie: the CLI
//! keeps it in a file next to the database.

use crate::core::accounts::AccountLogic;
use crate::db::log::ttlog_quiet;
use crate::db::sessions::{
    delete_session, delete_user_sessions, find_session_user, insert_session,
};
use crate::db::users::find_user_by_id;
use crate::errors::AppResult;
use crate::models::user::User;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub struct SessionLogic;

impl SessionLogic {
    /// Authenticate and open a session. `None` on bad credentials.
    /// A user holds one session at a time: earlier tokens stop working.
    pub fn login(conn: &Connection, username: &str, password: &str) -> AppResult<Option<(User, String)>> {
        let Some(user) = AccountLogic::authenticate(conn, username, password)? else {
            ttlog_quiet(conn, "login_failed", username.trim(), "Invalid username or password");
            return Ok(None);
        };

        let replaced = delete_user_sessions(conn, user.id)?;
        if replaced > 0 {
            log::debug!("{}: {} previous session(s) closed", user.username, replaced);
        }

        let token = Uuid::new_v4().to_string();
        insert_session(conn, &token, user.id)?;
        ttlog_quiet(conn, "login", &user.username, "Session opened");
        Ok(Some((user, token)))
    }

    pub fn logout(conn: &Connection, token: &str) -> AppResult<bool> {
        let removed = delete_session(conn, token)?;
        if removed {
            ttlog_quiet(conn, "logout", "", "Session closed");
        }
        Ok(removed)
    }

    /// Active user owning the session, if the token is still valid.
    pub fn current_user(conn: &Connection, token: &str) -> AppResult<Option<User>> {
        let Some(user_id) = find_session_user(conn, token)? else {
            return Ok(None);
        };
        Ok(find_user_by_id(conn, user_id)?.filter(|u| u.is_active))
    }

    pub fn read_token(path: &Path) -> AppResult<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        let token = fs::read_to_string(path)?.trim().to_string();
        Ok(if token.is_empty() { None } else { Some(token) })
    }

    pub fn write_token(path: &Path, token: &str) -> AppResult<()> {
        fs::write(path, token)?;
        Ok(())
    }

    pub fn clear_token(path: &Path) -> AppResult<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
