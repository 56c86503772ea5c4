//! Roles, warehouses and banks: the admin-maintained lookup tables.

use crate::cli::parser::{BankAction, Commands, WarehouseAction};
use crate::config::Config;
use crate::db::reference::{insert_bank, insert_warehouse, list_banks, list_warehouses};
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};

use super::open_db;

pub fn handle_roles() -> AppResult<()> {
    let mut table = Table::new(vec![
        Column::new("Code", 9),
        Column::new("Name", 9),
        Column::new("Description", 45),
    ]);
    for role in Role::ALL {
        table.add_row(vec![
            role.to_db_str().to_string(),
            role.display_name().to_string(),
            role.description().to_string(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

pub fn handle_warehouse(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Warehouse { action } = cmd else {
        return Ok(());
    };
    let pool = open_db(cfg)?;

    match action {
        WarehouseAction::Add { name, address } => {
            let id = insert_warehouse(&pool.conn, name, address.as_deref())?;
            success(format!("Warehouse '{}' created (id {})", name.trim(), id));
        }
        WarehouseAction::List => {
            let warehouses = list_warehouses(&pool.conn)?;
            if warehouses.is_empty() {
                warning("No warehouses registered.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Name", 24),
                Column::new("Address", 40),
            ]);
            for w in &warehouses {
                table.add_row(vec![
                    w.id.to_string(),
                    w.to_string(),
                    or_dash(w.address.as_deref()),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}

pub fn handle_bank(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Bank { action } = cmd else {
        return Ok(());
    };
    let pool = open_db(cfg)?;

    match action {
        BankAction::Add {
            code,
            name_th,
            name_eng,
        } => {
            let id = insert_bank(&pool.conn, code, name_th.as_deref(), name_eng.as_deref())?;
            success(format!("Bank '{}' created (id {})", code.trim(), id));
        }
        BankAction::List { search } => {
            let banks = list_banks(&pool.conn, search.as_deref())?;
            if banks.is_empty() {
                warning("No banks found.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::new("Code", 8),
                Column::new("Name (TH)", 30),
                Column::new("Name (EN)", 30),
            ]);
            for b in &banks {
                table.add_row(vec![
                    b.bank_code.clone(),
                    or_dash(b.bank_name_th.as_deref()),
                    or_dash(b.bank_name_eng.as_deref()),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
