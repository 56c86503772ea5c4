use crate::cli::parser::{Commands, JobrunAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::web::form::Form;
use crate::web::request::Request;
use crate::web::route::Route;

use super::browse;

/// Turn `DAY:ROUND[:REMARKS]` into the form fields of that day.
fn add_entry(form: &mut Form, raw: &str) -> AppResult<()> {
    let mut parts = raw.splitn(3, ':');
    let day = parts.next().unwrap_or("").trim();
    if day.parse::<u32>().is_err() {
        return Err(AppError::InvalidInput(format!(
            "Invalid entry '{}': expected DAY:ROUND[:REMARKS]",
            raw
        )));
    }
    form.insert(&format!("round_info_{day}"), parts.next().unwrap_or(""));
    form.insert(&format!("remarks_{day}"), parts.next().unwrap_or(""));
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Jobrun { action } = cmd else {
        return Ok(());
    };

    match action {
        JobrunAction::Submit {
            year,
            month,
            form,
            entries,
        } => {
            let mut body = match form {
                Some(encoded) => Form::parse(encoded)?,
                None => Form::new(),
            };
            for raw in entries {
                add_entry(&mut body, raw)?;
            }
            body.insert("year", year);
            body.insert("month", month);

            browse(cfg, Request::post(Route::JobRunning.path(), body))
        }

        JobrunAction::List { year, month } => {
            let mut params = Form::new();
            if let Some(y) = year {
                params.insert("year", y);
            }
            if let Some(m) = month {
                params.insert("month", m);
            }
            browse(cfg, Request::get(Route::JobRunning.path()).with_params(params))
        }
    }
}
