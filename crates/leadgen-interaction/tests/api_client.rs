//! End-to-end tests for `ApiClient` against an in-process HTTP server.

use async_trait::async_trait;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use leadgen_core::LeadgenError;
use leadgen_core::api::{LeadApi, UnauthorizedHandler};
use leadgen_core::records::{ListQuery, SellerUpdate};
use leadgen_core::user::RecordId;
use leadgen_interaction::ApiClient;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
struct CountingHandler {
    calls: AtomicUsize,
}

impl CountingHandler {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnauthorizedHandler for CountingHandler {
    async fn handle_unauthorized(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string()
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "admin" && body["password"] == "admin123" {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "token": "abc",
                "user": {"id": 1, "username": "admin", "email": "admin@example.com"}
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
    }
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if bearer(&headers) == "Bearer abc" {
        (
            StatusCode::OK,
            Json(json!({"success": true, "data": {"id": 1, "username": "admin"}})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Token is invalid"})),
        )
    }
}

/// Echoes the Authorization header and query string back as seller fields.
async fn sellers(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [{
            "id": 1,
            "name": bearer(&headers),
            "status": params.get("status").cloned().unwrap_or_default(),
            "notes": params.get("limit").cloned().unwrap_or_default()
        }]
    }))
}

async fn seller(Path(id): Path<String>) -> Json<Value> {
    Json(json!({"success": true, "data": {"id": id, "name": "Acme"}}))
}

/// Stores the body as the seller, with the Authorization header as location.
async fn update_seller(
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut record = body;
    record["id"] = json!(id);
    record["location"] = json!(bearer(&headers));
    Json(json!({"success": true, "message": "Seller updated successfully", "data": record}))
}

async fn scrape() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"success": false, "message": "Invalid Amazon seller URL"})),
    )
}

async fn brands() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Token has expired"})),
    )
}

async fn research() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn analyze() -> &'static str {
    "this is not json"
}

async fn metrics() -> Json<Value> {
    Json(json!({"success": true}))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({"success": true, "data": []}))
}

async fn start_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/sellers", get(sellers))
        .route("/api/sellers/{id}", get(seller).put(update_seller))
        .route("/api/sellers/scrape", post(scrape))
        .route("/api/brands", get(brands))
        .route("/api/brands/research", post(research))
        .route("/api/qa/analyze", post(analyze))
        .route("/api/qa/metrics/{id}", get(metrics))
        .route("/slow/api/sellers", get(slow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_bearer_token_follows_set_token() {
    let addr = start_server().await;
    let client = client_for(addr);

    let rows = client.list_sellers(&ListQuery::default()).await.unwrap();
    assert_eq!(rows[0].name.as_deref(), Some("none"));

    client.set_token(Some("abc".to_string()));
    let rows = client.list_sellers(&ListQuery::default()).await.unwrap();
    assert_eq!(rows[0].name.as_deref(), Some("Bearer abc"));

    client.set_token(None);
    let rows = client.list_sellers(&ListQuery::default()).await.unwrap();
    assert_eq!(rows[0].name.as_deref(), Some("none"));
}

#[tokio::test]
async fn test_blank_token_is_not_attached() {
    let addr = start_server().await;
    let client = client_for(addr);

    client.set_token(Some("  ".to_string()));
    assert!(client.token().is_none());
    let rows = client.list_sellers(&ListQuery::default()).await.unwrap();
    assert_eq!(rows[0].name.as_deref(), Some("none"));
}

#[tokio::test]
async fn test_list_query_parameters_are_sent() {
    let addr = start_server().await;
    let client = client_for(addr);

    let query = ListQuery {
        status: Some("validated".to_string()),
        limit: Some(5),
        ..Default::default()
    };
    let rows = client.list_sellers(&query).await.unwrap();
    assert_eq!(rows[0].status.as_deref(), Some("validated"));
    assert_eq!(rows[0].notes.as_deref(), Some("5"));
}

#[tokio::test]
async fn test_item_path_uses_record_id() {
    let addr = start_server().await;
    let client = client_for(addr);

    let seller = client.get_seller(&RecordId::from(42)).await.unwrap();
    assert_eq!(seller.id, RecordId::from("42"));
    assert_eq!(seller.name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_update_seller_sends_only_changed_fields() {
    let addr = start_server().await;
    let client = client_for(addr);
    client.set_token(Some("abc".to_string()));

    let update = SellerUpdate {
        status: Some("contacted".to_string()),
        notes: Some("Left a voicemail".to_string()),
        ..Default::default()
    };
    let seller = client
        .update_seller(&RecordId::from(42), &update)
        .await
        .unwrap();

    assert_eq!(seller.id, RecordId::from("42"));
    assert_eq!(seller.status.as_deref(), Some("contacted"));
    assert_eq!(seller.notes.as_deref(), Some("Left a voicemail"));
    assert!(seller.name.is_none());
    assert_eq!(seller.location.as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn test_login_success() {
    let addr = start_server().await;
    let client = client_for(addr);

    let grant = client.login("admin", "admin123").await.unwrap();
    assert_eq!(grant.token.as_deref(), Some("abc"));
    assert_eq!(grant.user.unwrap().email, "admin@example.com");
    // Login does not attach the token by itself.
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_login_rejection_is_a_form_error() {
    let addr = start_server().await;
    let client = client_for(addr);
    let handler = Arc::new(CountingHandler::default());
    let weak = Arc::downgrade(&handler);
    client.set_unauthorized_handler(weak);

    let err = client.login("admin", "wrong").await.unwrap_err();
    assert_eq!(
        err,
        LeadgenError::Validation {
            status: 401,
            message: Some("Invalid credentials".to_string())
        }
    );
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn test_current_user_uses_explicit_token() {
    let addr = start_server().await;
    let client = client_for(addr);
    let handler = Arc::new(CountingHandler::default());
    let weak = Arc::downgrade(&handler);
    client.set_unauthorized_handler(weak);

    client.set_token(Some("stale".to_string()));
    let user = client.current_user("abc").await.unwrap();
    assert_eq!(user.username, "admin");

    let err = client.current_user("xyz").await.unwrap_err();
    assert!(err.is_unauthorized());
    // Verification handles its own 401.
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn test_unauthorized_invokes_handler_per_response() {
    let addr = start_server().await;
    let client = client_for(addr);
    let handler = Arc::new(CountingHandler::default());
    let weak = Arc::downgrade(&handler);
    client.set_unauthorized_handler(weak);

    let first = client.list_brands(&ListQuery::default()).await.unwrap_err();
    let second = client.list_brands(&ListQuery::default()).await.unwrap_err();

    assert!(first.is_unauthorized());
    assert!(second.is_unauthorized());
    assert_eq!(handler.calls(), 2);
}

#[tokio::test]
async fn test_dropped_handler_is_ignored() {
    let addr = start_server().await;
    let client = client_for(addr);
    let handler = Arc::new(CountingHandler::default());
    let weak = Arc::downgrade(&handler);
    client.set_unauthorized_handler(weak);
    drop(handler);

    let err = client.list_brands(&ListQuery::default()).await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_client_error_carries_server_message() {
    let addr = start_server().await;
    let client = client_for(addr);

    let err = client.scrape_seller("not-a-url").await.unwrap_err();
    assert_eq!(
        err,
        LeadgenError::Validation {
            status: 422,
            message: Some("Invalid Amazon seller URL".to_string())
        }
    );
    assert_eq!(
        err.banner_text("Failed to scrape seller").as_deref(),
        Some("Invalid Amazon seller URL")
    );
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let addr = start_server().await;
    let client = client_for(addr);

    let err = client.research_brand("Nike").await.unwrap_err();
    assert_eq!(
        err,
        LeadgenError::Server {
            status: 500,
            message: None
        }
    );
    assert_eq!(
        err.banner_text("Failed to research brand").as_deref(),
        Some("Failed to research brand")
    );
}

#[tokio::test]
async fn test_unparseable_success_body_is_malformed() {
    let addr = start_server().await;
    let client = client_for(addr);

    let err = client.analyze_brand(&RecordId::from(1)).await.unwrap_err();
    assert!(matches!(err, LeadgenError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_missing_data_on_item_is_malformed() {
    let addr = start_server().await;
    let client = client_for(addr);

    let err = client.qa_metrics(&RecordId::from(1)).await.unwrap_err();
    assert!(matches!(err, LeadgenError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_timeout_is_network_unreachable() {
    let addr = start_server().await;
    let client =
        ApiClient::new(format!("http://{}/slow", addr), Duration::from_millis(200)).unwrap();

    let err = client.list_sellers(&ListQuery::default()).await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn test_refused_connection_is_network_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client.list_sellers(&ListQuery::default()).await.unwrap_err();
    assert!(err.is_network());
}
