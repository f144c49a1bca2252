use anyhow::Result;
use leadgen_application::views::BrandsController;
use leadgen_core::navigation::Route;
use leadgen_core::user::RecordId;
use std::process::ExitCode;

use crate::ListArgs;
use crate::bootstrap::AppContext;
use crate::output;

async fn controller(ctx: &mut AppContext) -> Result<Option<BrandsController>> {
    Ok(ctx
        .require_session(Route::Brands)
        .await?
        .map(|_| BrandsController::new(ctx.api.clone())))
}

pub async fn list(ctx: &mut AppContext, args: ListArgs) -> Result<ExitCode> {
    let Some(brands) = controller(ctx).await? else {
        return Ok(ExitCode::FAILURE);
    };
    let brands = brands.with_query(args.into());

    brands.load().await;
    let state = brands.state().await;
    output::brands_table(&state.brands.items);
    Ok(output::banners(&state.banners))
}

pub async fn show(ctx: &mut AppContext, id: &RecordId) -> Result<ExitCode> {
    let Some(brands) = controller(ctx).await? else {
        return Ok(ExitCode::FAILURE);
    };

    match brands.detail(id).await {
        Ok(brand) => {
            output::brand_detail(&brand);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(e
            .banner_text("Failed to fetch brand")
            .map(|text| output::error(&text))
            .unwrap_or(ExitCode::FAILURE)),
    }
}

pub async fn research(ctx: &mut AppContext, name: &str) -> Result<ExitCode> {
    let Some(brands) = controller(ctx).await? else {
        return Ok(ExitCode::FAILURE);
    };

    brands.research(name).await;
    let state = brands.state().await;
    if state.banners.success.is_some() {
        output::brands_table(&state.brands.items);
    }
    Ok(output::banners(&state.banners))
}
