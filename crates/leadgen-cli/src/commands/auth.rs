use anyhow::Result;
use colored::Colorize;
use leadgen_application::session::LOGIN_FAILED_MESSAGE;
use leadgen_core::api::{LeadApi, Registration};
use leadgen_core::navigation::Route;
use std::process::ExitCode;

use super::read_password;
use crate::bootstrap::AppContext;
use crate::output;

pub async fn login(
    ctx: &AppContext,
    username: &str,
    password: Option<String>,
) -> Result<ExitCode> {
    let password = match password {
        Some(p) => p,
        None => read_password(false)?,
    };

    match ctx.session.sign_in(username, &password).await {
        Ok(session) => {
            let name = session
                .user()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| username.to_string());
            println!("{} {}", "Logged in as".green(), name.bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_storage() => Ok(output::error(&format!(
            "{}. Could not save the session: {}",
            LOGIN_FAILED_MESSAGE, e
        ))),
        Err(e) if e.is_network() => Ok(output::error(&format!(
            "{}. Could not reach {}; check that the API server is running.",
            LOGIN_FAILED_MESSAGE,
            ctx.config.base_url()
        ))),
        Err(e) => Ok(output::error(
            &e.banner_text(LOGIN_FAILED_MESSAGE)
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
        )),
    }
}

pub async fn logout(ctx: &AppContext) -> Result<ExitCode> {
    // The saved token is needed to notify the server; verifying it is not.
    if let Some(verification) = ctx.session.restore().await {
        verification.abort();
    }
    ctx.session.sign_out().await;
    println!("{}", "Logged out.".green());
    Ok(ExitCode::SUCCESS)
}

pub async fn whoami(ctx: &mut AppContext) -> Result<ExitCode> {
    let Some(session) = ctx.require_session(Route::Dashboard).await? else {
        return Ok(ExitCode::FAILURE);
    };
    let Some(user) = session.user() else {
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", user.display_name().bold());
    println!("  {:<9} {}", "Username:".dimmed(), user.username);
    println!("  {:<9} {}", "Email:".dimmed(), user.email);
    if let Some(role) = &user.role {
        println!("  {:<9} {}", "Role:".dimmed(), role);
    }
    println!("  {:<9} {}", "Server:".dimmed(), ctx.config.base_url());
    Ok(ExitCode::SUCCESS)
}

pub async fn register(
    ctx: &AppContext,
    username: String,
    email: String,
    password: Option<String>,
    full_name: Option<String>,
) -> Result<ExitCode> {
    let password = match password {
        Some(p) => p,
        None => read_password(true)?,
    };
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Ok(output::error("Please enter username, email and password"));
    }

    let registration = Registration {
        username,
        email,
        password,
        full_name,
    };
    match ctx.api.register(&registration).await {
        Ok(ack) => {
            let message = ack
                .message
                .unwrap_or_else(|| "Registration successful".to_string());
            println!("{}", message.green());
            println!("Run `leadgen login -u {}` to sign in.", registration.username);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(output::error(
            &e.banner_text("Registration failed")
                .unwrap_or_else(|| "Registration failed".to_string()),
        )),
    }
}
