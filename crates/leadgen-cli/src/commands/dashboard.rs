use anyhow::Result;
use colored::Colorize;
use leadgen_application::views::DashboardController;
use leadgen_core::navigation::Route;
use std::process::ExitCode;

use crate::bootstrap::AppContext;
use crate::output;

pub async fn show(ctx: &mut AppContext) -> Result<ExitCode> {
    let Some(session) = ctx.require_session(Route::Dashboard).await? else {
        return Ok(ExitCode::FAILURE);
    };

    let dashboard = DashboardController::new(ctx.api.clone());
    dashboard.load().await;
    let state = dashboard.state().await;

    if let Some(user) = session.user() {
        println!("Welcome, {}", user.display_name().bold());
    }
    println!();
    println!("  {:<14} {}", "Total Sellers".dimmed(), state.stats.sellers);
    println!("  {:<14} {}", "Total Brands".dimmed(), state.stats.brands);
    println!("  {:<14} {}", "QA Completed".dimmed(), state.stats.qa_completed);

    match state.error {
        Some(error) => Ok(output::error(&error)),
        None => Ok(ExitCode::SUCCESS),
    }
}
