use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::accounts::AccountLogic;
use crate::core::export::ExportLogic;
use crate::core::session::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::models::job_run::MonthSpec;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;

use super::open_db;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        user,
        force,
    } = cmd
    {
        let mut pool = open_db(cfg)?;

        let owner = match user {
            Some(username) => AccountLogic::require(&pool.conn, username)?,
            None => {
                let token = SessionLogic::read_token(&cfg.session_file())?
                    .ok_or(AppError::NotAuthenticated)?;
                SessionLogic::current_user(&pool.conn, &token)?.ok_or(AppError::NotAuthenticated)?
            }
        };

        let month = period.as_deref().map(MonthSpec::parse_period).transpose()?;
        let path = expand_tilde(file);
        let path_str = path.to_string_lossy();

        let rows = ExportLogic::export(&mut pool, &owner, month, *format, &path_str, *force)?;
        info(format!("{} job run(s) of {} exported", rows, owner.username));
    }
    Ok(())
}
