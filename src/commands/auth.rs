//! `login`, `register`, `logout` and `whoami`.

use std::io::{self, BufRead};

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, Context, announce};
use crate::api::models::RegisterRequest;
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::notice::Notice;

/// Use the given password, or read one line from stdin.
fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn cmd_login(username: &str, password: Option<String>, output: OutputOptions) -> Result<()> {
    let ctx = Context::load("login")?;
    let password = resolve_password(password)?;
    let user = ctx.api.auth().login(username, &password).await?;

    CommandOutput::new(json!({
        "id": user.id,
        "name": user.name,
        "role": user.role.to_string(),
    }))
    .with_text(
        Notice::success(format!("Signed in as {} ({})", user.name, user.role)).render(),
    )
    .print(output)
}

pub async fn cmd_register(
    username: &str,
    email: &str,
    password: Option<String>,
    full_name: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let ctx = Context::load("register")?;
    let request = RegisterRequest {
        username: username.trim().to_string(),
        password: resolve_password(password)?,
        email: email.trim().to_string(),
        full_name,
        phone,
    };
    ctx.api.auth().register(&request).await?;
    announce(
        Notice::success(format!(
            "Account created. Run `bitebox login {}` to sign in.",
            request.username
        )),
        OutputOptions::default(),
    );
    Ok(())
}

pub fn cmd_logout() -> Result<()> {
    let ctx = Context::load("logout")?;
    let was_signed_in = ctx.session().is_signed_in()?;
    ctx.api.auth().logout()?;
    let notice = if was_signed_in {
        Notice::success("Signed out.")
    } else {
        Notice::info("Not signed in.")
    };
    announce(notice, OutputOptions::default());
    Ok(())
}

pub fn cmd_whoami(output: OutputOptions) -> Result<()> {
    let ctx = Context::load("whoami")?;
    match ctx.session().user()? {
        Some(user) => CommandOutput::new(json!({
            "signedIn": true,
            "id": user.id,
            "name": user.name,
            "role": user.role.to_string(),
            "email": user.email,
        }))
        .with_text(format!(
            "{} {} ({})",
            user.name.bold(),
            format!("#{}", user.id).dimmed(),
            user.role.to_string().cyan()
        ))
        .print(output),
        None => CommandOutput::new(json!({ "signedIn": false }))
            .with_text("Not signed in.".dimmed().to_string())
            .print(output),
    }
}
