use anyhow::Result;
use leadgen_application::views::SellersController;
use leadgen_core::navigation::Route;
use leadgen_core::records::SellerUpdate;
use leadgen_core::user::RecordId;
use std::process::ExitCode;

use crate::ListArgs;
use crate::bootstrap::AppContext;
use crate::output;

async fn controller(ctx: &mut AppContext) -> Result<Option<SellersController>> {
    Ok(ctx
        .require_session(Route::Sellers)
        .await?
        .map(|_| SellersController::new(ctx.api.clone())))
}

pub async fn list(ctx: &mut AppContext, args: ListArgs) -> Result<ExitCode> {
    let Some(sellers) = controller(ctx).await? else {
        return Ok(ExitCode::FAILURE);
    };
    let sellers = sellers.with_query(args.into());

    sellers.load().await;
    let state = sellers.state().await;
    output::sellers_table(&state.sellers.items);
    Ok(output::banners(&state.banners))
}

pub async fn show(ctx: &mut AppContext, id: &RecordId) -> Result<ExitCode> {
    let Some(sellers) = controller(ctx).await? else {
        return Ok(ExitCode::FAILURE);
    };

    match sellers.detail(id).await {
        Ok(seller) => {
            output::seller_detail(&seller);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(e
            .banner_text("Failed to fetch seller")
            .map(|text| output::error(&text))
            .unwrap_or(ExitCode::FAILURE)),
    }
}

pub async fn scrape(ctx: &mut AppContext, url: &str) -> Result<ExitCode> {
    let Some(sellers) = controller(ctx).await? else {
        return Ok(ExitCode::FAILURE);
    };

    sellers.scrape(url).await;
    let state = sellers.state().await;
    if state.banners.success.is_some() {
        output::sellers_table(&state.sellers.items);
    }
    Ok(output::banners(&state.banners))
}

pub async fn update(ctx: &mut AppContext, id: &RecordId, changes: SellerUpdate) -> Result<ExitCode> {
    let Some(sellers) = controller(ctx).await? else {
        return Ok(ExitCode::FAILURE);
    };

    sellers.update(id, &changes).await;
    Ok(output::banners(&sellers.state().await.banners))
}

pub async fn delete(ctx: &mut AppContext, id: &RecordId) -> Result<ExitCode> {
    let Some(sellers) = controller(ctx).await? else {
        return Ok(ExitCode::FAILURE);
    };

    sellers.delete(id).await;
    Ok(output::banners(&sellers.state().await.banners))
}
