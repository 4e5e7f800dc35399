//! Session store: who is logged in and with which token.
//!
//! State is held in a `tokio::sync::watch` channel so any number of
//! observers can [`subscribe`](SessionStore::subscribe) and react to changes.
//! Every mutation replaces the state atomically; readers only ever see
//! a complete [`Session`].

use std::sync::Arc;

use pocketshop_core::{AccessToken, Credentials, User};
use tokio::sync::watch;
use tracing::{Instrument, info, instrument, warn};

use crate::api::{ApiClient, ApiError, LoginOutcome};
use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};

/// Snapshot of the session state.
///
/// `user` and `token` are either both present or both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    token: Option<AccessToken>,
    is_loading: bool,
    error: Option<String>,
}

/// Coarse view of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nobody is logged in and nothing is in flight.
    Anonymous,
    /// A login request is in flight.
    Authenticating,
    /// A user is logged in.
    Authenticated,
    /// The last login attempt failed.
    AuthError,
}

impl Session {
    /// Profile of the logged-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Bearer token of the logged-in user.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Whether a login request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message describing the last failed login, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Derive the coarse status. An in-flight request wins over the rest.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        if self.is_loading {
            SessionStatus::Authenticating
        } else if self.is_authenticated() {
            SessionStatus::Authenticated
        } else if self.error.is_some() {
            SessionStatus::AuthError
        } else {
            SessionStatus::Anonymous
        }
    }

    fn begin_login(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn succeed(&mut self, outcome: &LoginOutcome) {
        self.user = Some(outcome.user.clone());
        self.token = Some(outcome.token.clone());
        self.error = None;
        self.is_loading = false;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.token = None;
    }

    fn fail(&mut self, message: String) {
        self.user = None;
        self.token = None;
        self.error = Some(message);
        self.is_loading = false;
    }
}

/// Observable session state backed by an [`ApiClient`].
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    state: Arc<watch::Sender<Session>>,
}

impl SessionStore {
    /// Create a store in the anonymous state.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// Log in with `credentials`.
    ///
    /// While the request is in flight the session reports
    /// [`SessionStatus::Authenticating`]. On success the user and token are
    /// stored; on failure both are cleared and [`Session::error`] holds a
    /// displayable message. The outcome is returned as well, for callers
    /// that want it directly.
    ///
    /// The request runs on its own task: if the caller stops awaiting this
    /// future, the response is still applied to the session when it arrives.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the login fails.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        self.state.send_modify(Session::begin_login);

        let task = tokio::spawn(
            apply_login(self.api.clone(), Arc::clone(&self.state), credentials.clone())
                .in_current_span(),
        );

        match task.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => {
                // Only reachable when the runtime shuts down mid-request.
                let err = ApiError::Interrupted;
                let message = err.user_message();
                self.state.send_modify(|session| session.fail(message));
                Err(err)
            }
        }
    }

    /// Forget the user and token. Always succeeds, even when logged out.
    ///
    /// The loading flag and last error are left as they are.
    pub fn logout(&self) {
        self.state.send_modify(Session::sign_out);
        clear_sentry_user();
        add_breadcrumb("session", "Logged out", None);
        info!("Logged out");
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Token of the logged-in user, if any.
    #[must_use]
    pub fn token(&self) -> Option<AccessToken> {
        self.state.borrow().token.clone()
    }

    /// Receiver that is notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}

/// Run the login request and write its result into `state`.
async fn apply_login(
    api: ApiClient,
    state: Arc<watch::Sender<Session>>,
    credentials: Credentials,
) -> Result<LoginOutcome, ApiError> {
    match api.login(&credentials).await {
        Ok(outcome) => {
            state.send_modify(|session| session.succeed(&outcome));
            set_sentry_user(&outcome.user.id, Some(&outcome.user.email));
            add_breadcrumb("session", "Logged in", None);
            info!(user_id = %outcome.user.id, "Login successful");
            Ok(outcome)
        }
        Err(err) => {
            let message = err.user_message();
            warn!(error = %err, "Login failed");
            state.send_modify(|session| session.fail(message));
            Err(err)
        }
    }
}
