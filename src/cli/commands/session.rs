//! `login`, `logout` and `whoami`: the session token lives in a file next
//! to the database and is sent with every page request.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::formatting::or_dash;
use crate::web::form::Form;
use crate::web::request::Request;
use crate::web::route::Route;

use super::{browse, open_db, send};

pub fn login(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { username, password } = cmd {
        let form = Form::new()
            .with("username", username)
            .with("password", password);
        browse(cfg, Request::post(Route::Login.path(), form))?;
        success(format!("Logged in as '{}'", username.trim()));
    }
    Ok(())
}

pub fn logout(cfg: &Config) -> AppResult<()> {
    if SessionLogic::read_token(&cfg.session_file())?.is_none() {
        info("No open session.");
        return Ok(());
    }
    send(cfg, Request::post(Route::Logout.path(), Form::new()))?;
    success("Logged out");
    Ok(())
}

pub fn whoami(cfg: &Config) -> AppResult<()> {
    let token = SessionLogic::read_token(&cfg.session_file())?.ok_or(AppError::NotAuthenticated)?;
    let pool = open_db(cfg)?;
    let user = SessionLogic::current_user(&pool.conn, &token)?.ok_or(AppError::NotAuthenticated)?;

    println!("{:<10}: {}", "Username", user.username);
    println!("{:<10}: {}", "Name", or_dash(Some(user.full_name().as_str())));
    println!("{:<10}: {}", "Email", or_dash(Some(user.email.as_str())));
    println!(
        "{:<10}: {}",
        "Role",
        or_dash(user.role.map(|r| r.to_db_str()))
    );
    Ok(())
}
