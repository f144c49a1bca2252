//! REST API contract consumed by the client.
//!
//! The HTTP adapter in `leadgen-interaction` implements [`LeadApi`]; the
//! session store implements [`UnauthorizedHandler`] so the adapter can purge
//! the session on a 401 regardless of which view issued the call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::records::{AnalysisResult, Brand, ListQuery, QaMetrics, Seller, SellerUpdate};
use crate::user::{RecordId, UserProfile};

/// Token and profile granted by `POST /api/auth/login`.
///
/// Either may be missing in a malformed but successful response; the caller
/// decides how to treat that.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

/// Acknowledgement of a mutating action (scrape, research, delete).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Typed access to every endpoint the client uses.
#[async_trait]
pub trait LeadApi: Send + Sync {
    /// Replaces the bearer token attached to subsequent requests.
    ///
    /// Takes effect synchronously: any request built after this call returns
    /// carries the new token (or none).
    fn set_token(&self, token: Option<String>);

    /// The token currently attached to requests.
    fn token(&self) -> Option<String>;

    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant>;

    async fn register(&self, registration: &Registration) -> Result<ActionAck>;

    /// Fetches the profile for `token`, independent of the attached token.
    async fn current_user(&self, token: &str) -> Result<UserProfile>;

    async fn logout(&self) -> Result<()>;

    async fn list_sellers(&self, query: &ListQuery) -> Result<Vec<Seller>>;

    async fn get_seller(&self, id: &RecordId) -> Result<Seller>;

    async fn scrape_seller(&self, url: &str) -> Result<ActionAck>;

    /// Applies `update` and returns the stored seller.
    async fn update_seller(&self, id: &RecordId, update: &SellerUpdate) -> Result<Seller>;

    async fn delete_seller(&self, id: &RecordId) -> Result<ActionAck>;

    async fn list_brands(&self, query: &ListQuery) -> Result<Vec<Brand>>;

    async fn get_brand(&self, id: &RecordId) -> Result<Brand>;

    async fn research_brand(&self, brand_name: &str) -> Result<ActionAck>;

    async fn analyze_brand(&self, brand_id: &RecordId) -> Result<AnalysisResult>;

    async fn qa_metrics(&self, brand_id: &RecordId) -> Result<QaMetrics>;
}

/// Cross-cutting reaction to an HTTP 401.
#[async_trait]
pub trait UnauthorizedHandler: Send + Sync {
    async fn handle_unauthorized(&self);
}
