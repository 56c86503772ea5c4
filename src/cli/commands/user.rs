use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::accounts::AccountLogic;
use crate::db::log::ttlog_quiet;
use crate::db::users::{list_users, set_active};
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::NewUser;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};

use super::open_db;

/// Parse a role argument; `none` clears the role.
pub(crate) fn parse_role(raw: &str) -> AppResult<Option<Role>> {
    if raw.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Role::from_code(raw)
        .map(Some)
        .ok_or_else(|| AppError::InvalidRole(raw.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_db(cfg)?;

    match action {
        UserAction::Add {
            username,
            password,
            email,
            first_name,
            last_name,
            role,
        } => {
            let role = match role {
                Some(r) => parse_role(r)?,
                None => None,
            };
            let user = AccountLogic::create_user(
                &mut pool.conn,
                NewUser {
                    username: username.clone(),
                    email: email.clone(),
                    password: password.clone(),
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    role,
                    is_staff: false,
                },
            )?;
            success(format!("User '{}' created (id {})", user.username, user.id));
        }

        UserAction::Superuser {
            username,
            password,
            email,
        } => {
            let user = AccountLogic::create_superuser(
                &mut pool.conn,
                NewUser {
                    username: username.clone(),
                    email: email.clone(),
                    password: password.clone(),
                    ..Default::default()
                },
            )?;
            success(format!("Superuser '{}' created (id {})", user.username, user.id));
        }

        UserAction::List { role, search } => {
            let role = match role {
                Some(r) => parse_role(r)?,
                None => None,
            };
            let users = list_users(&pool.conn, role, search.as_deref())?;
            if users.is_empty() {
                warning("No users found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Username", 16),
                Column::new("Name", 22),
                Column::new("Email", 28),
                Column::new("Role", 9),
                Column::new("Staff", 5),
                Column::new("Active", 6),
            ]);
            for u in &users {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    or_dash(Some(u.full_name().as_str())),
                    or_dash(Some(u.email.as_str())),
                    or_dash(u.role.map(|r| r.to_db_str())),
                    if u.is_staff { "yes" } else { "no" }.to_string(),
                    if u.is_active { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        UserAction::SetRole { username, role } => {
            let user = AccountLogic::change_role(&mut pool.conn, username, parse_role(role)?)?;
            success(format!(
                "Role of '{}' set to {}",
                user.username,
                user.role.map(|r| r.to_db_str()).unwrap_or("none")
            ));
        }

        UserAction::Passwd { username, password } => {
            AccountLogic::set_password(&pool.conn, username, password)?;
            success(format!("Password of '{}' changed", username));
        }

        UserAction::Activate { username } | UserAction::Deactivate { username } => {
            let active = matches!(action, UserAction::Activate { .. });
            let user = AccountLogic::require(&pool.conn, username)?;
            set_active(&pool.conn, user.id, active)?;
            let state = if active { "activated" } else { "deactivated" };
            ttlog_quiet(&pool.conn, "user_active", username, &format!("User {}", state));
            success(format!("User '{}' {}", username, state));
        }
    }

    Ok(())
}
