//! `LeadApi` implementation: one method per REST endpoint.

use async_trait::async_trait;
use leadgen_core::api::{ActionAck, LeadApi, LoginGrant, Registration};
use leadgen_core::records::{AnalysisResult, Brand, ListQuery, QaMetrics, Seller, SellerUpdate};
use leadgen_core::user::{RecordId, UserProfile};
use leadgen_core::{LeadgenError, Result};
use reqwest::Method;

use crate::client::{ApiClient, Interception};
use crate::schema::{
    AckBody, AnalyzeRequest, Envelope, LoginRequest, LoginResponse, ResearchRequest,
    ScrapeRequest,
};

const LOGIN: &str = "/api/auth/login";
const REGISTER: &str = "/api/auth/register";
const ME: &str = "/api/auth/me";
const LOGOUT: &str = "/api/auth/logout";
const SELLERS: &str = "/api/sellers";
const SELLERS_SCRAPE: &str = "/api/sellers/scrape";
const BRANDS: &str = "/api/brands";
const BRANDS_RESEARCH: &str = "/api/brands/research";
const QA_ANALYZE: &str = "/api/qa/analyze";
const QA_METRICS: &str = "/api/qa/metrics";

fn item_path(collection: &str, id: &RecordId) -> String {
    format!("{}/{}", collection, id)
}

#[async_trait]
impl LeadApi for ApiClient {
    fn set_token(&self, token: Option<String>) {
        self.store_token(token);
    }

    fn token(&self) -> Option<String> {
        self.current_token()
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant> {
        let builder = self
            .anonymous_request(Method::POST, LOGIN)
            .json(&LoginRequest { username, password });

        // Wrong credentials come back as 401; that is a form error here, not
        // an expired session.
        let response: LoginResponse = self
            .execute(LOGIN, builder, Interception::Bypass)
            .await
            .map_err(|e| match e {
                LeadgenError::Unauthorized { message } => LeadgenError::Validation {
                    status: 401,
                    message: Some(message.unwrap_or_else(|| "Invalid credentials".to_string())),
                },
                other => other,
            })?;

        response.into_grant()
    }

    async fn register(&self, registration: &Registration) -> Result<ActionAck> {
        let builder = self
            .anonymous_request(Method::POST, REGISTER)
            .json(registration);
        let body: AckBody = self.execute(REGISTER, builder, Interception::Bypass).await?;
        body.into_ack()
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile> {
        let builder = self.anonymous_request(Method::GET, ME).bearer_auth(token);
        let envelope: Envelope<UserProfile> =
            self.execute(ME, builder, Interception::Bypass).await?;
        envelope.into_confirmed_data(ME)
    }

    async fn logout(&self) -> Result<()> {
        let builder = self.request(Method::POST, LOGOUT);
        let body: AckBody = self.execute(LOGOUT, builder, Interception::Bypass).await?;
        body.into_ack().map(|_| ())
    }

    async fn list_sellers(&self, query: &ListQuery) -> Result<Vec<Seller>> {
        let builder = self.request(Method::GET, SELLERS).query(query);
        let envelope: Envelope<Vec<Seller>> =
            self.execute(SELLERS, builder, Interception::Global).await?;
        envelope.into_list()
    }

    async fn get_seller(&self, id: &RecordId) -> Result<Seller> {
        let path = item_path(SELLERS, id);
        let builder = self.request(Method::GET, &path);
        let envelope: Envelope<Seller> =
            self.execute(&path, builder, Interception::Global).await?;
        envelope.into_data(&path)
    }

    async fn scrape_seller(&self, url: &str) -> Result<ActionAck> {
        let builder = self
            .request(Method::POST, SELLERS_SCRAPE)
            .json(&ScrapeRequest { url });
        let body: AckBody = self
            .execute(SELLERS_SCRAPE, builder, Interception::Global)
            .await?;
        body.into_ack()
    }

    async fn update_seller(&self, id: &RecordId, update: &SellerUpdate) -> Result<Seller> {
        let path = item_path(SELLERS, id);
        let builder = self.request(Method::PUT, &path).json(update);
        let envelope: Envelope<Seller> =
            self.execute(&path, builder, Interception::Global).await?;
        envelope.into_data(&path)
    }

    async fn delete_seller(&self, id: &RecordId) -> Result<ActionAck> {
        let path = item_path(SELLERS, id);
        let builder = self.request(Method::DELETE, &path);
        let body: AckBody = self.execute(&path, builder, Interception::Global).await?;
        body.into_ack()
    }

    async fn list_brands(&self, query: &ListQuery) -> Result<Vec<Brand>> {
        let builder = self.request(Method::GET, BRANDS).query(query);
        let envelope: Envelope<Vec<Brand>> =
            self.execute(BRANDS, builder, Interception::Global).await?;
        envelope.into_list()
    }

    async fn get_brand(&self, id: &RecordId) -> Result<Brand> {
        let path = item_path(BRANDS, id);
        let builder = self.request(Method::GET, &path);
        let envelope: Envelope<Brand> =
            self.execute(&path, builder, Interception::Global).await?;
        envelope.into_data(&path)
    }

    async fn research_brand(&self, brand_name: &str) -> Result<ActionAck> {
        let builder = self
            .request(Method::POST, BRANDS_RESEARCH)
            .json(&ResearchRequest { brand_name });
        let body: AckBody = self
            .execute(BRANDS_RESEARCH, builder, Interception::Global)
            .await?;
        body.into_ack()
    }

    async fn analyze_brand(&self, brand_id: &RecordId) -> Result<AnalysisResult> {
        let builder = self
            .request(Method::POST, QA_ANALYZE)
            .json(&AnalyzeRequest { brand_id });
        let envelope: Envelope<AnalysisResult> = self
            .execute(QA_ANALYZE, builder, Interception::Global)
            .await?;
        envelope.into_data(QA_ANALYZE)
    }

    async fn qa_metrics(&self, brand_id: &RecordId) -> Result<QaMetrics> {
        let path = item_path(QA_METRICS, brand_id);
        let builder = self.request(Method::GET, &path);
        let envelope: Envelope<QaMetrics> =
            self.execute(&path, builder, Interception::Global).await?;
        envelope.into_data(&path)
    }
}
