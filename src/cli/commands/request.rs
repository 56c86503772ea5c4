use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::pages::render_response;
use crate::utils::path::expand_tilde;
use crate::web::form::Form;
use crate::web::request::{Method, Request};

use super::send;

/// Raw page request: the response is rendered as is, redirects are not
/// followed.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Request {
        method,
        target,
        form,
        files,
    } = cmd
    {
        let mut req = Request::from_target(Method::parse(method)?, target)?;
        if let Some(encoded) = form {
            req.form = Form::parse(encoded)?;
        }
        for spec in files {
            let (field, path) = spec.split_once('=').ok_or_else(|| {
                AppError::InvalidInput(format!("Invalid file '{}': expected FIELD=PATH", spec))
            })?;
            req = req.with_file(field.trim(), expand_tilde(path.trim()));
        }

        let resp = send(cfg, req)?;
        render_response(&resp);
    }
    Ok(())
}
