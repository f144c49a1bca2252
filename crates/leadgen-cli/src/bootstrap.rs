//! Composition root: wires config, storage, the API client and the session
//! store together.

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use leadgen_application::{GuardDecision, RouteGuard, Router, SessionStore};
use leadgen_core::api::UnauthorizedHandler;
use leadgen_core::config::ClientConfig;
use leadgen_core::navigation::{NavigationIntent, RedirectReason, Route};
use leadgen_core::session::{CredentialStore, Session};
use leadgen_infrastructure::{
    ConfigService, FileCredentialStore, InMemoryCredentialStore, LeadgenPaths,
};
use leadgen_interaction::ApiClient;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;

use crate::GlobalArgs;

pub struct AppContext {
    pub config: ClientConfig,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
    navigation: mpsc::UnboundedReceiver<NavigationIntent>,
    router: Router,
}

/// Loads the effective configuration for `global`.
pub fn load_config(global: &GlobalArgs) -> ClientConfig {
    config_service(global)
        .get_config()
        .with_overrides(global.api_url.clone(), None)
}

pub fn config_service(global: &GlobalArgs) -> ConfigService {
    match &global.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new(),
    }
}

pub fn bootstrap(global: &GlobalArgs) -> Result<AppContext> {
    let config = load_config(global);

    let api = Arc::new(ApiClient::from_config(&config).context("Failed to create API client")?);

    let credentials: Arc<dyn CredentialStore> = if global.ephemeral {
        Arc::new(InMemoryCredentialStore::new())
    } else {
        let dir = match &global.credentials_dir {
            Some(dir) => dir.clone(),
            None => LeadgenPaths::new()
                .credentials_dir()
                .map_err(|e| anyhow!("Failed to locate credentials directory: {}", e))?,
        };
        tracing::debug!(dir = %dir.display(), "Using credential directory");
        Arc::new(FileCredentialStore::new(dir))
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let session = Arc::new(
        SessionStore::new(api.clone(), credentials, tx)
            .with_verify_failure(config.session.verify_failure),
    );

    let handler: Weak<dyn UnauthorizedHandler> = Arc::downgrade(&session) as Weak<dyn UnauthorizedHandler>;
    api.set_unauthorized_handler(handler);

    Ok(AppContext {
        config,
        api,
        session,
        navigation: rx,
        router: Router::new(Route::anonymous_entry()),
    })
}

impl AppContext {
    /// Restores the saved session and guards `route`.
    ///
    /// Returns the signed-in session, or `None` after telling the user to
    /// log in.
    pub async fn require_session(&mut self, route: Route) -> Result<Option<Session>> {
        if let Some(verification) = self.session.restore().await {
            verification
                .await
                .context("Session verification task failed")?;
        }

        let mut guard = RouteGuard::new(self.session.subscribe());
        let decision = guard.admit(route).await;
        self.router.apply(decision);

        match decision {
            GuardDecision::Render(_) => Ok(Some(self.session.current())),
            GuardDecision::Redirect(_) | GuardDecision::Loading => {
                eprintln!(
                    "{}",
                    "Not logged in. Run `leadgen login -u <username>` first.".yellow()
                );
                Ok(None)
            }
        }
    }

    /// Applies navigation requests raised while the command ran and reports
    /// a session that the server rejected.
    pub fn finish(&mut self) {
        while let Ok(intent) = self.navigation.try_recv() {
            let moved = self.router.apply_intent(intent);
            if moved && intent.reason == RedirectReason::Unauthorized {
                eprintln!(
                    "{}",
                    "Your session has expired. Please log in again.".yellow()
                );
            }
        }
        tracing::debug!(route = %self.router.current(), "Final route");
    }
}
