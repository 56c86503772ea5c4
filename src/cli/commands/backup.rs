use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

use super::open_db;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let mut pool = open_db(cfg)?;
        let dest = expand_tilde(file);
        BackupLogic::backup(&mut pool, cfg, &dest.to_string_lossy(), *compress, *force)?;
    }

    Ok(())
}
