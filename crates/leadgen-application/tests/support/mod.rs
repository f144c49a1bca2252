//! Scriptable `LeadApi` for store and controller tests.
#![allow(dead_code)]

use async_trait::async_trait;
use leadgen_core::api::{ActionAck, LeadApi, LoginGrant, Registration};
use leadgen_core::records::{AnalysisResult, Brand, ListQuery, QaMetrics, Seller, SellerUpdate};
use leadgen_core::user::{RecordId, UserProfile};
use leadgen_core::{LeadgenError, Result};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

/// How `GET /api/auth/me` answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verify {
    Accept,
    Reject,
    Offline,
}

pub struct FakeApi {
    token: RwLock<Option<String>>,
    pub verify: Mutex<Verify>,
    pub verify_delay: Mutex<Option<Duration>>,
    pub list_delay: Mutex<Option<Duration>>,
    pub omit_login_user: AtomicBool,
    pub omit_login_token: AtomicBool,
    pub sellers: Mutex<Result<Vec<Seller>>>,
    pub brands: Mutex<Result<Vec<Brand>>>,
    pub action: Mutex<Result<ActionAck>>,
    pub updated: Mutex<Option<SellerUpdate>>,
    pub analysis: Mutex<Result<AnalysisResult>>,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            token: RwLock::new(None),
            verify: Mutex::new(Verify::Accept),
            verify_delay: Mutex::new(None),
            list_delay: Mutex::new(None),
            omit_login_user: AtomicBool::new(false),
            omit_login_token: AtomicBool::new(false),
            sellers: Mutex::new(Ok(Vec::new())),
            brands: Mutex::new(Ok(Vec::new())),
            action: Mutex::new(Ok(ActionAck::default())),
            updated: Mutex::new(None),
            analysis: Mutex::new(Ok(analysis())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == name).count()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }

    async fn list_pause(&self) {
        let delay = *self.list_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

pub fn seller(id: i64, name: &str) -> Seller {
    serde_json::from_value(json!({"id": id, "name": name})).unwrap()
}

pub fn brand(id: i64, name: &str) -> Brand {
    serde_json::from_value(json!({"id": id, "name": name})).unwrap()
}

pub fn analysis() -> AnalysisResult {
    serde_json::from_value(json!({
        "profit_margin": 32.5,
        "competition_score": 4.0,
        "status": "highly_profitable",
        "brand_id": 1,
        "brand_name": "Acme"
    }))
    .unwrap()
}

pub fn server_admin() -> UserProfile {
    serde_json::from_value(json!({
        "id": 1,
        "username": "admin",
        "email": "admin@example.com",
        "role": "admin"
    }))
    .unwrap()
}

#[async_trait]
impl LeadApi for FakeApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginGrant> {
        self.record("login");
        if username != "admin" || password != "admin123" {
            return Err(LeadgenError::Validation {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            });
        }
        Ok(LoginGrant {
            token: (!self.omit_login_token.load(Ordering::SeqCst)).then(|| "abc".to_string()),
            user: (!self.omit_login_user.load(Ordering::SeqCst)).then(server_admin),
        })
    }

    async fn register(&self, _registration: &Registration) -> Result<ActionAck> {
        self.record("register");
        self.action.lock().unwrap().clone()
    }

    async fn current_user(&self, _token: &str) -> Result<UserProfile> {
        self.record("me");
        let delay = *self.verify_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let verify = *self.verify.lock().unwrap();
        match verify {
            Verify::Accept => Ok(server_admin()),
            Verify::Reject => Err(LeadgenError::Unauthorized {
                message: Some("Token is invalid".to_string()),
            }),
            Verify::Offline => Err(LeadgenError::network("connection refused")),
        }
    }

    async fn logout(&self) -> Result<()> {
        self.record("logout");
        Ok(())
    }

    async fn list_sellers(&self, _query: &ListQuery) -> Result<Vec<Seller>> {
        self.record("list_sellers");
        self.list_pause().await;
        self.sellers.lock().unwrap().clone()
    }

    async fn get_seller(&self, id: &RecordId) -> Result<Seller> {
        self.record("get_seller");
        serde_json::from_value(json!({"id": id, "name": "Acme"})).map_err(Into::into)
    }

    async fn scrape_seller(&self, _url: &str) -> Result<ActionAck> {
        self.record("scrape_seller");
        self.action.lock().unwrap().clone()
    }

    async fn update_seller(&self, id: &RecordId, update: &SellerUpdate) -> Result<Seller> {
        self.record("update_seller");
        *self.updated.lock().unwrap() = Some(update.clone());
        self.action.lock().unwrap().clone()?;
        serde_json::from_value(json!({"id": id, "name": update.name})).map_err(Into::into)
    }

    async fn delete_seller(&self, _id: &RecordId) -> Result<ActionAck> {
        self.record("delete_seller");
        self.action.lock().unwrap().clone()
    }

    async fn list_brands(&self, _query: &ListQuery) -> Result<Vec<Brand>> {
        self.record("list_brands");
        self.list_pause().await;
        self.brands.lock().unwrap().clone()
    }

    async fn get_brand(&self, id: &RecordId) -> Result<Brand> {
        self.record("get_brand");
        serde_json::from_value(json!({"id": id, "name": "Acme"})).map_err(Into::into)
    }

    async fn research_brand(&self, _brand_name: &str) -> Result<ActionAck> {
        self.record("research_brand");
        self.action.lock().unwrap().clone()
    }

    async fn analyze_brand(&self, _brand_id: &RecordId) -> Result<AnalysisResult> {
        self.record("analyze_brand");
        self.analysis.lock().unwrap().clone()
    }

    async fn qa_metrics(&self, _brand_id: &RecordId) -> Result<QaMetrics> {
        self.record("qa_metrics");
        Ok(QaMetrics::default())
    }
}
