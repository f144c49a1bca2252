//! QA analysis screen.

use leadgen_core::Result;
use leadgen_core::api::LeadApi;
use leadgen_core::records::{AnalysisResult, Brand, ListQuery, QaMetrics};
use leadgen_core::user::RecordId;
use std::sync::Arc;

use super::messages::{ANALYZE_FAILED, FETCH_BRANDS_FAILED, MISSING_BRAND_SELECTION};
use super::scope::{Banners, ListState, ViewScope, fetch_banner};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QaView {
    pub brands: ListState<Brand>,
    pub selected: Option<RecordId>,
    pub analyzing: bool,
    pub analysis: Option<AnalysisResult>,
    pub banners: Banners,
}

pub struct QaController {
    api: Arc<dyn LeadApi>,
    view: ViewScope<QaView>,
}

impl QaController {
    pub fn new(api: Arc<dyn LeadApi>) -> Self {
        Self {
            api,
            view: ViewScope::new(QaView::default()),
        }
    }

    pub async fn state(&self) -> QaView {
        self.view.snapshot().await
    }

    pub fn unmount(&self) {
        self.view.unmount();
    }

    /// Fetches the brands offered for selection.
    pub async fn load(&self) {
        if self.view.update(|v| v.brands.loading = true).await.is_none() {
            return;
        }

        let result = self.api.list_brands(&ListQuery::default()).await;

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

    /// Changes the selected brand. A previous analysis belongs to the old
    /// selection and is dropped.
    pub async fn select(&self, brand_id: Option<RecordId>) {
        self.view
            .update(|v| {
                if v.selected != brand_id {
                    v.analysis = None;
                }
                v.selected = brand_id;
            })
            .await;
    }

    /// Runs the profitability analysis for the selected brand.
    pub async fn analyze(&self) {
        let selected = self
            .view
            .update(|v| {
                let Some(id) = v.selected.clone() else {
                    v.banners.clear();
                    v.banners.error = Some(MISSING_BRAND_SELECTION.to_string());
                    return None;
                };
                if v.analyzing {
                    return None;
                }
                v.analyzing = true;
                v.analysis = None;
                v.banners.clear();
                Some(id)
            })
            .await
            .flatten();
        let Some(brand_id) = selected else {
            return;
        };

        let result = self.api.analyze_brand(&brand_id).await;

        self.view
            .update(|v| {
                v.analyzing = false;
                match result {
                    Ok(analysis) => v.analysis = Some(analysis),
                    Err(e) => v.banners.error = e.banner_text(ANALYZE_FAILED),
                }
            })
            .await;
    }

    /// Fetches the stored QA metrics for a brand. Does not touch the view state.
    pub async fn metrics(&self, brand_id: &RecordId) -> Result<QaMetrics> {
        self.api.qa_metrics(brand_id).await
    }
}
