use anyhow::Result;
use leadgen_application::views::QaController;
use leadgen_core::navigation::Route;
use leadgen_core::user::RecordId;
use std::process::ExitCode;

use crate::bootstrap::AppContext;
use crate::output;

pub async fn analyze(ctx: &mut AppContext, brand_id: &RecordId) -> Result<ExitCode> {
    if ctx.require_session(Route::Qa).await?.is_none() {
        return Ok(ExitCode::FAILURE);
    }

    let qa = QaController::new(ctx.api.clone());
    qa.select(Some(brand_id.clone())).await;
    qa.analyze().await;

    let state = qa.state().await;
    if let Some(result) = &state.analysis {
        output::analysis(result);
    }
    Ok(output::banners(&state.banners))
}

pub async fn metrics(ctx: &mut AppContext, brand_id: &RecordId) -> Result<ExitCode> {
    if ctx.require_session(Route::Qa).await?.is_none() {
        return Ok(ExitCode::FAILURE);
    }

    let qa = QaController::new(ctx.api.clone());
    match qa.metrics(brand_id).await {
        Ok(metrics) => {
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(e
            .banner_text("Failed to fetch QA metrics")
            .map(|text| output::error(&text))
            .unwrap_or(ExitCode::FAILURE)),
    }
}
