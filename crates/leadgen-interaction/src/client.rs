use leadgen_core::api::UnauthorizedHandler;
use leadgen_core::config::ClientConfig;
use leadgen_core::{LeadgenError, Result};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock, Weak};
use std::time::Duration;

use crate::schema::ErrorBody;

/// How a request takes part in the global 401 handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interception {
    /// A 401 purges the session via the registered handler.
    Global,
    /// The caller handles 401 itself (login, token verification).
    Bypass,
}

/// Client for the Lead Generation REST API.
///
/// Clones share the token slot and the unauthorized handler.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    token: Arc<RwLock<Option<String>>>,
    unauthorized_handler: Arc<RwLock<Option<Weak<dyn UnauthorizedHandler>>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("has_token", &self.current_token().is_some())
            .finish()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LeadgenError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            token: Arc::new(RwLock::new(None)),
            unauthorized_handler: Arc::new(RwLock::new(None)),
        })
    }

    /// Creates a client from the effective configuration.
    ///
    /// Logs the base URL in development and warns when a local address is
    /// used anywhere else.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url();

        if config.local_address_outside_development() {
            tracing::warn!(
                base_url = %base_url,
                environment = %config.environment,
                "Using a local API address outside development; set LEADGEN_API_URL or [api].base_url"
            );
        } else {
            tracing::debug!(base_url = %base_url, "API base URL");
        }

        Self::new(base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers the handler invoked on any intercepted 401.
    ///
    /// Held weakly: the session store owns the client, so a strong reference
    /// back would leak both.
    pub fn set_unauthorized_handler(&self, handler: Weak<dyn UnauthorizedHandler>) {
        if let Ok(mut slot) = self.unauthorized_handler.write() {
            *slot = Some(handler);
        }
    }

    pub(crate) fn store_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token.filter(|t| !t.trim().is_empty());
        }
    }

    pub(crate) fn current_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a request carrying the current session token, if any.
    ///
    /// The token is read here, at build time, so a login or logout that
    /// completed before this call is always observed.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Builds a request carrying no token.
    pub(crate) fn anonymous_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Sends `builder` and parses a `T` from a successful response.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        builder: RequestBuilder,
        interception: Interception,
    ) -> Result<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| self.network_error(endpoint, e))?;

        let status = response.status();
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| self.network_error(endpoint, e))?;
            return serde_json::from_slice::<T>(&bytes)
                .map_err(|e| LeadgenError::malformed(endpoint, e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::message_from(&body);
        let err = LeadgenError::from_status(status.as_u16(), message).unwrap_or_else(|| {
            LeadgenError::malformed(endpoint, format!("unexpected status {}", status))
        });

        if err.is_unauthorized() && interception == Interception::Global {
            tracing::warn!(endpoint, "Request unauthorized, resetting session");
            self.notify_unauthorized().await;
        } else {
            tracing::debug!(endpoint, status = status.as_u16(), error = %err, "Request failed");
        }

        Err(err)
    }

    async fn notify_unauthorized(&self) {
        let handler = self
            .unauthorized_handler
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().and_then(Weak::upgrade));

        if let Some(handler) = handler {
            handler.handle_unauthorized().await;
        }
    }

    /// Converts a transport failure. Timeouts and refused connections are
    /// deliberately indistinguishable to callers.
    fn network_error(&self, endpoint: &str, err: reqwest::Error) -> LeadgenError {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| endpoint.to_string());

        if err.is_timeout() {
            tracing::error!(url = %url, timeout = ?self.timeout, "Request timed out");
        } else {
            tracing::error!(url = %url, base_url = %self.base_url, error = %err, "Connection error");
        }
        if self.base_url.contains("localhost") || self.base_url.contains("127.0.0.1") {
            tracing::error!("Make sure the API server is running or set LEADGEN_API_URL");
        }

        LeadgenError::network(err.to_string())
    }
}
