//! Seller sniping screen.

use leadgen_core::Result;
use leadgen_core::api::LeadApi;
use leadgen_core::records::{ListQuery, Seller, SellerUpdate};
use leadgen_core::user::RecordId;
use std::sync::Arc;

use super::messages::{
    DELETE_FAILED, FETCH_SELLERS_FAILED, INVALID_URL, MISSING_SELLER_CHANGES, SCRAPE_FAILED,
    SELLER_DELETED, SELLER_SCRAPED, SELLER_UPDATED, UPDATE_FAILED,
};
use super::scope::{Banners, ListState, ViewScope, fetch_banner};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellersView {
    pub sellers: ListState<Seller>,
    pub scraping: bool,
    pub updating: bool,
    pub deleting: bool,
    pub banners: Banners,
}

pub struct SellersController {
    api: Arc<dyn LeadApi>,
    query: ListQuery,
    view: ViewScope<SellersView>,
}

impl SellersController {
    pub fn new(api: Arc<dyn LeadApi>) -> Self {
        Self {
            api,
            query: ListQuery::default(),
            view: ViewScope::new(SellersView::default()),
        }
    }

    /// Filters and pagination for every list fetch.
    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    pub async fn state(&self) -> SellersView {
        self.view.snapshot().await
    }

    pub fn unmount(&self) {
        self.view.unmount();
    }

    pub async fn load(&self) {
        if self.view.update(|v| v.sellers.loading = true).await.is_none() {
            return;
        }

        let result = self.api.list_sellers(&self.query).await;

        self.view
            .update(|v| {
                v.sellers.loading = false;
                match result {
                    Ok(sellers) => {
                        v.sellers.items = sellers;
                        v.banners.error = None;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to fetch sellers");
                        v.sellers.items.clear();
                        if let Some(text) = fetch_banner(&e, FETCH_SELLERS_FAILED) {
                            v.banners.error = Some(text);
                        }
                    }
                }
            })
            .await;
    }

    /// Submits a seller storefront URL for scraping.
    ///
    /// An empty URL is rejected without calling the server. Ignored while a
    /// previous scrape is still running.
    pub async fn scrape(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            self.view
                .update(|v| {
                    v.banners.clear();
                    v.banners.error = Some(INVALID_URL.to_string());
                })
                .await;
            return;
        }

        let started = self
            .view
            .update(|v| {
                if v.scraping {
                    return false;
                }
                v.scraping = true;
                v.banners.clear();
                true
            })
            .await;
        if started != Some(true) {
            return;
        }

        let result = self.api.scrape_seller(url).await;

        let succeeded = self
            .view
            .update(|v| {
                v.scraping = false;
                match result {
                    Ok(_) => {
                        v.banners.success = Some(SELLER_SCRAPED.to_string());
                        true
                    }
                    Err(e) => {
                        v.banners.error = e.banner_text(SCRAPE_FAILED);
                        false
                    }
                }
            })
            .await;

        if succeeded == Some(true) {
            self.load().await;
        }
    }

    /// Edits a seller. An update with no fields set is rejected locally.
    pub async fn update(&self, id: &RecordId, changes: &SellerUpdate) {
        if changes.is_empty() {
            self.view
                .update(|v| {
                    v.banners.clear();
                    v.banners.error = Some(MISSING_SELLER_CHANGES.to_string());
                })
                .await;
            return;
        }

        let started = self
            .view
            .update(|v| {
                if v.updating {
                    return false;
                }
                v.updating = true;
                v.banners.clear();
                true
            })
            .await;
        if started != Some(true) {
            return;
        }

        let result = self.api.update_seller(id, changes).await;

        let succeeded = self
            .view
            .update(|v| {
                v.updating = false;
                match result {
                    Ok(_) => {
                        v.banners.success = Some(SELLER_UPDATED.to_string());
                        true
                    }
                    Err(e) => {
                        v.banners.error = e.banner_text(UPDATE_FAILED);
                        false
                    }
                }
            })
            .await;

        if succeeded == Some(true) {
            self.load().await;
        }
    }

    pub async fn delete(&self, id: &RecordId) {
        let started = self
            .view
            .update(|v| {
                if v.deleting {
                    return false;
                }
                v.deleting = true;
                v.banners.clear();
                true
            })
            .await;
        if started != Some(true) {
            return;
        }

        let result = self.api.delete_seller(id).await;

        let succeeded = self
            .view
            .update(|v| {
                v.deleting = false;
                match result {
                    Ok(_) => {
                        v.banners.success = Some(SELLER_DELETED.to_string());
                        true
                    }
                    Err(e) => {
                        v.banners.error = e.banner_text(DELETE_FAILED);
                        false
                    }
                }
            })
            .await;

        if succeeded == Some(true) {
            self.load().await;
        }
    }

    /// Fetches a single seller. Does not touch the view state.
    pub async fn detail(&self, id: &RecordId) -> Result<Seller> {
        self.api.get_seller(id).await
    }
}
