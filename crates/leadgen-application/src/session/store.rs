use async_trait::async_trait;
use leadgen_core::api::{LeadApi, UnauthorizedHandler};
use leadgen_core::config::VerifyFailurePolicy;
use leadgen_core::navigation::{NavigationIntent, RedirectReason, Route};
use leadgen_core::session::{CredentialStore, Session, SessionStatus, StoredCredentials};
use leadgen_core::user::UserProfile;
use leadgen_core::{LeadgenError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;

/// Message shown when a login response succeeds without a token.
pub const NO_TOKEN_MESSAGE: &str = "No token received from server";

/// Fallback text for a failed sign-in.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Owns the client's authentication state.
///
/// `SessionStore` is responsible for:
/// - Restoring persisted credentials on startup and verifying them
/// - Signing in and out, keeping memory, storage and the API token in step
/// - Resetting the session when any request comes back 401
///
/// Every change is published through a `watch` channel; screen changes are
/// requested through a [`NavigationIntent`] channel instead of being
/// performed here.
pub struct SessionStore {
    api: Arc<dyn LeadApi>,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<Session>,
    navigation: mpsc::UnboundedSender<NavigationIntent>,
    verify_failure: VerifyFailurePolicy,
    /// Bumped by every restore, login, logout and reset. A verification
    /// result is applied only if the generation it started in is current.
    generation: AtomicU64,
    /// Serializes state transitions that touch storage.
    transition: Mutex<()>,
}

impl SessionStore {
    /// Creates a store in the `Unknown` state.
    ///
    /// # Arguments
    ///
    /// * `api` - The API adapter whose bearer token this store controls
    /// * `credentials` - Durable storage for the token and user profile
    /// * `navigation` - Receives redirect requests for the router
    pub fn new(
        api: Arc<dyn LeadApi>,
        credentials: Arc<dyn CredentialStore>,
        navigation: mpsc::UnboundedSender<NavigationIntent>,
    ) -> Self {
        let (state, _) = watch::channel(Session::unknown());
        Self {
            api,
            credentials,
            state,
            navigation,
            verify_failure: VerifyFailurePolicy::default(),
            generation: AtomicU64::new(0),
            transition: Mutex::new(()),
        }
    }

    /// Sets what happens to persisted credentials when verification fails.
    pub fn with_verify_failure(mut self, policy: VerifyFailurePolicy) -> Self {
        self.verify_failure = policy;
        self
    }

    /// Returns a receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Returns a snapshot of the current state.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Waits until the status is `Authenticated` or `Anonymous`.
    pub async fn wait_until_resolved(&self) -> Session {
        let mut rx = self.state.subscribe();
        let resolved = rx
            .wait_for(|s| s.status().is_resolved())
            .await
            .map(|session| session.clone())
            .ok();
        resolved.unwrap_or_else(|| self.current())
    }

    /// Restores the persisted session.
    ///
    /// With both entries present the cached user is exposed immediately in
    /// `Verifying` and the token is verified in the background; the returned
    /// handle resolves when that verification has been applied. Otherwise
    /// the session becomes `Anonymous` before this returns.
    ///
    /// Storage failures are never propagated: unreadable entries are purged.
    /// A session that is already verifying or signed in is left alone.
    pub async fn restore(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let guard = self.transition.lock().await;
        let status = self.current().status();
        if !status.can_transition_to(SessionStatus::Verifying) {
            tracing::debug!(%status, "Session already active, skipping restore");
            return None;
        }
        let generation = self.next_generation();

        let stored = match self.credentials.load().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Stored credentials unreadable, purging");
                self.purge_storage().await;
                None
            }
        };

        let verifying = stored.and_then(|c| {
            let token = c.token.clone();
            Session::verifying(c.user, c.token).ok().map(|s| (s, token))
        });

        let Some((session, token)) = verifying else {
            self.api.set_token(None);
            self.publish(Session::anonymous());
            tracing::info!("No stored session");
            return None;
        };

        self.api.set_token(Some(token.clone()));
        self.publish(session);
        drop(guard);
        tracing::info!("Restored stored session, verifying token");

        let store = Arc::clone(self);
        Some(tokio::spawn(async move {
            store.verify_in(&token, generation).await;
        }))
    }

    /// Confirms `token` with the server and applies the outcome.
    ///
    /// Returns the resulting status. Never fails; a rejected or unverifiable
    /// token resets the session.
    pub async fn verify(&self, token: &str) -> SessionStatus {
        let generation = self.generation.load(Ordering::SeqCst);
        self.verify_in(token, generation).await
    }

    async fn verify_in(&self, token: &str, generation: u64) -> SessionStatus {
        let result = self.api.current_user(token).await;

        let _guard = self.transition.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding verification result from a superseded session");
            return self.current().status();
        }

        let failure = match result {
            Ok(user) => match Session::authenticated(user, token) {
                Ok(session) => {
                    self.publish(session);
                    tracing::info!("Stored session verified");
                    return SessionStatus::Authenticated;
                }
                Err(e) => e,
            },
            Err(e) => e,
        };

        let retain = failure.is_network()
            && self.verify_failure == VerifyFailurePolicy::RetainOnNetworkError;
        if retain {
            tracing::warn!(error = %failure, "Could not verify session, keeping stored credentials");
        } else {
            tracing::warn!(error = %failure, "Session verification failed, purging stored credentials");
            self.purge_storage().await;
        }

        self.next_generation();
        self.api.set_token(None);
        self.publish(Session::anonymous());
        SessionStatus::Anonymous
    }

    /// Installs a signed-in session, overwriting whatever state exists.
    ///
    /// Both entries are persisted before the token is handed to the API
    /// adapter. If persisting fails the in-memory state is left unchanged.
    pub async fn login(&self, user: UserProfile, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        let session = Session::authenticated(user.clone(), token.clone())?;

        let _guard = self.transition.lock().await;
        self.credentials
            .save(&StoredCredentials::new(token.clone(), user))
            .await?;

        self.next_generation();
        self.api.set_token(Some(token));
        self.publish(session);
        tracing::info!("Signed in");
        Ok(())
    }

    /// Clears memory and storage and requests the login screen.
    pub async fn logout(&self) {
        let _guard = self.transition.lock().await;
        self.next_generation();
        self.purge_storage().await;
        self.api.set_token(None);
        self.publish(Session::anonymous());
        tracing::info!("Signed out");
        self.navigate(NavigationIntent::to_login(RedirectReason::Logout));
    }

    /// Runs the login form flow: validates input, authenticates against the
    /// server, installs the session and requests the dashboard.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty fields, rejected credentials, or a response
    ///   without a token (message [`NO_TOKEN_MESSAGE`])
    /// - `NetworkUnreachable` when the server cannot be reached
    /// - `Storage` when the credentials cannot be persisted
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(LeadgenError::invalid_input(
                "Please enter username and password",
            ));
        }

        let grant = self.api.login(username, password).await?;
        let token = grant.token.ok_or_else(|| LeadgenError::Validation {
            status: 200,
            message: Some(NO_TOKEN_MESSAGE.to_string()),
        })?;
        let user = grant
            .user
            .unwrap_or_else(|| UserProfile::fallback(username));

        self.login(user, token).await?;
        self.navigate(NavigationIntent::new(Route::home(), RedirectReason::SignedIn));
        Ok(self.current())
    }

    /// Notifies the server (best effort) and then signs out locally.
    pub async fn sign_out(&self) {
        if self.api.token().is_some() {
            if let Err(e) = self.api.logout().await {
                tracing::debug!(error = %e, "Server logout failed, continuing locally");
            }
        }
        self.logout().await;
    }

    /// Replaces the state, checking that the move is a lifecycle edge.
    fn publish(&self, next: Session) {
        let current = self.state.borrow().status();
        debug_assert!(
            current.can_transition_to(next.status()),
            "invalid session transition {} -> {}",
            current,
            next.status()
        );
        self.state.send_replace(next);
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn purge_storage(&self) {
        if let Err(e) = self.credentials.clear().await {
            tracing::error!(error = %e, "Failed to clear stored credentials");
        }
    }

    fn navigate(&self, intent: NavigationIntent) {
        if self.navigation.send(intent).is_err() {
            tracing::debug!(target_route = %intent.target, "No router listening for navigation");
        }
    }
}

#[async_trait]
impl UnauthorizedHandler for SessionStore {
    /// Resets the session after any intercepted 401.
    ///
    /// Only the call that actually moves the session out of a signed-in
    /// state requests the login screen, so a burst of concurrent 401s
    /// redirects once.
    async fn handle_unauthorized(&self) {
        let _guard = self.transition.lock().await;
        self.next_generation();
        self.purge_storage().await;
        self.api.set_token(None);

        let was_signed_in = self.state.send_if_modified(|session| {
            match session.status() {
                SessionStatus::Authenticated | SessionStatus::Verifying => {
                    *session = Session::anonymous();
                    true
                }
                SessionStatus::Unknown | SessionStatus::Anonymous => false,
            }
        });

        if was_signed_in {
            tracing::warn!("Session rejected by server, signing out");
            self.navigate(NavigationIntent::to_login(RedirectReason::Unauthorized));
        }
    }
}
