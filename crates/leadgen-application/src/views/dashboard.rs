//! Dashboard screen.

use leadgen_core::api::LeadApi;
use leadgen_core::records::ListQuery;
use std::sync::Arc;

use super::messages::FETCH_STATS_FAILED;
use super::scope::{ViewScope, fetch_banner};

/// Headline counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub sellers: usize,
    pub brands: usize,
    /// Not tracked by the server yet; always zero.
    pub qa_completed: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct DashboardController {
    api: Arc<dyn LeadApi>,
    view: ViewScope<DashboardView>,
}

impl DashboardController {
    pub fn new(api: Arc<dyn LeadApi>) -> Self {
        Self {
            api,
            view: ViewScope::new(DashboardView::default()),
        }
    }

    pub async fn state(&self) -> DashboardView {
        self.view.snapshot().await
    }

    pub fn unmount(&self) {
        self.view.unmount();
    }

    /// Fetches sellers and brands concurrently and counts them.
    ///
    /// If either fetch fails the stats are zeroed and the error is set.
    pub async fn load(&self) {
        if self.view.update(|v| v.loading = true).await.is_none() {
            return;
        }

        let query = ListQuery::default();
        let (sellers, brands) = tokio::join!(
            self.api.list_sellers(&query),
            self.api.list_brands(&query)
        );

        self.view
            .update(|v| {
                v.loading = false;
                match (sellers, brands) {
                    (Ok(sellers), Ok(brands)) => {
                        v.error = None;
                        v.stats = DashboardStats {
                            sellers: sellers.len(),
                            brands: brands.len(),
                            qa_completed: 0,
                        };
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        tracing::warn!(error = %e, "Error fetching stats");
                        v.stats = DashboardStats::default();
                        v.error = fetch_banner(&e, FETCH_STATS_FAILED);
                    }
                }
            })
            .await;
    }
}
