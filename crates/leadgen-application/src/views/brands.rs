//! Brand research screen.

use leadgen_core::Result;
use leadgen_core::api::LeadApi;
use leadgen_core::records::{Brand, ListQuery};
use leadgen_core::user::RecordId;
use std::sync::Arc;

use super::messages::{BRAND_RESEARCHED, FETCH_BRANDS_FAILED, MISSING_BRAND_NAME, RESEARCH_FAILED};
use super::scope::{Banners, ListState, ViewScope, fetch_banner};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandsView {
    pub brands: ListState<Brand>,
    pub researching: bool,
    pub banners: Banners,
}

pub struct BrandsController {
    api: Arc<dyn LeadApi>,
    query: ListQuery,
    view: ViewScope<BrandsView>,
}

impl BrandsController {
    pub fn new(api: Arc<dyn LeadApi>) -> Self {
        Self {
            api,
            query: ListQuery::default(),
            view: ViewScope::new(BrandsView::default()),
        }
    }

    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    pub async fn state(&self) -> BrandsView {
        self.view.snapshot().await
    }

    pub fn unmount(&self) {
        self.view.unmount();
    }

    pub async fn load(&self) {
        if self.view.update(|v| v.brands.loading = true).await.is_none() {
            return;
        }

        let result = self.api.list_brands(&self.query).await;

        self.view
            .update(|v| {
                v.brands.loading = false;
                match result {
                    Ok(brands) => {
                        v.brands.items = brands;
                        v.banners.error = None;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to fetch brands");
                        v.brands.items.clear();
                        if let Some(text) = fetch_banner(&e, FETCH_BRANDS_FAILED) {
                            v.banners.error = Some(text);
                        }
                    }
                }
            })
            .await;
    }

    /// Starts research on a brand by name.
    pub async fn research(&self, brand_name: &str) {
        let brand_name = brand_name.trim();
        if brand_name.is_empty() {
            self.view
                .update(|v| {
                    v.banners.clear();
                    v.banners.error = Some(MISSING_BRAND_NAME.to_string());
                })
                .await;
            return;
        }

        let started = self
            .view
            .update(|v| {
                if v.researching {
                    return false;
                }
                v.researching = true;
                v.banners.clear();
                true
            })
            .await;
        if started != Some(true) {
            return;
        }

        let result = self.api.research_brand(brand_name).await;

        let succeeded = self
            .view
            .update(|v| {
                v.researching = false;
                match result {
                    Ok(_) => {
                        v.banners.success = Some(BRAND_RESEARCHED.to_string());
                        true
                    }
                    Err(e) => {
                        v.banners.error = e.banner_text(RESEARCH_FAILED);
                        false
                    }
                }
            })
            .await;

        if succeeded == Some(true) {
            self.load().await;
        }
    }

    pub async fn detail(&self, id: &RecordId) -> Result<Brand> {
        self.api.get_brand(id).await
    }
}
