//! Session store
//!
//! Owns the `Unauthenticated -> Authenticating -> Authenticated` state
//! machine. Transitions come from two directions: user-initiated
//! [`SessionStore::login`] / [`SessionStore::logout`] / [`SessionStore::restore`]
//! and the HTTP layer reporting authorization failures through
//! [`SessionStore::invalidate`]. They are ordered by a session epoch: every
//! request captures a [`RequestTicket`] carrying the epoch it was sent under,
//! and a failure only ends the session if that epoch is still the live one.
//!
//! Reads are synchronous and never hold the lock across an `.await`.

mod capability;
mod storage;

pub use capability::{Action, View};
pub use storage::{PersistedSession, SESSION_FILE, StorageError, TokenStorage};

use parking_lot::RwLock;
use shared::client::LoginRequest;
use shared::models::Identity;
use tokio::sync::broadcast;

use crate::api::AuthApi;
use crate::{ClientError, ClientResult};

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// An identity whose token `/auth/me` accepted
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub identity: Identity,
    pub token: String,
    pub epoch: u64,
}

/// Token and epoch captured when a request is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub token: Option<String>,
    pub epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { username: String, epoch: u64 },
    LoggedOut,
    /// An authorization failure ended the session; show the login surface
    Invalidated { epoch: u64 },
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    session: Option<Session>,
    /// Token in use while `Authenticating` (sign-in or restore in flight)
    pending_token: Option<String>,
    epoch: u64,
    /// Bumped by every login/restore start and by logout; a stale attempt
    /// can no longer complete.
    attempt: u64,
}

pub struct SessionStore {
    inner: RwLock<Inner>,
    storage: TokenStorage,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .field("epoch", &self.epoch())
            .field("storage", &self.storage.path())
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: TokenStorage) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: RwLock::new(Inner {
                state: SessionState::Unauthenticated,
                session: None,
                pending_token: None,
                epoch: 0,
                attempt: 0,
            }),
            storage,
            event_tx,
        }
    }

    // ========== Predicates ==========

    pub fn state(&self) -> SessionState {
        self.inner.read().state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn is_admin(&self) -> bool {
        let inner = self.inner.read();
        inner.state == SessionState::Authenticated
            && inner.session.as_ref().is_some_and(|s| s.identity.is_admin())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.read().session.as_ref().map(|s| s.identity.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.read().session.clone()
    }

    /// Number of sessions established so far
    pub fn epoch(&self) -> u64 {
        self.inner.read().epoch
    }

    pub fn can_view(&self, view: View) -> bool {
        if view.requires_admin() {
            self.is_admin()
        } else {
            self.is_authenticated()
        }
    }

    pub fn can(&self, action: Action) -> bool {
        if action.requires_admin() {
            self.is_admin()
        } else {
            self.is_authenticated()
        }
    }

    /// `NotAuthenticated` without a session, `PermissionDenied` for a role
    /// that lacks the action.
    pub fn require(&self, action: Action) -> ClientResult<()> {
        if !self.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        if !self.can(action) {
            return Err(ClientError::PermissionDenied(action));
        }
        Ok(())
    }

    /// Gate for loading a view; the admin-only users view maps to
    /// [`Action::ManageUsers`].
    pub fn require_view(&self, view: View) -> ClientResult<()> {
        if !self.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        if !self.can_view(view) {
            return Err(ClientError::PermissionDenied(Action::ManageUsers));
        }
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn storage(&self) -> &TokenStorage {
        &self.storage
    }

    // ========== HTTP layer hooks ==========

    /// Token and epoch for an outgoing request
    pub fn ticket(&self) -> RequestTicket {
        let inner = self.inner.read();
        let token = match inner.state {
            SessionState::Authenticated => inner.session.as_ref().map(|s| s.token.clone()),
            SessionState::Authenticating => inner.pending_token.clone(),
            SessionState::Unauthenticated => None,
        };
        RequestTicket {
            token,
            epoch: inner.epoch,
        }
    }

    /// Authorization failure reported for a request sent under `epoch`.
    ///
    /// Ends the session only if it is still authenticated at that epoch,
    /// so it fires at most once per epoch and never during a login.
    pub fn invalidate(&self, epoch: u64) -> bool {
        {
            let mut inner = self.inner.write();
            if inner.state != SessionState::Authenticated || inner.epoch != epoch {
                tracing::debug!(
                    epoch,
                    current = inner.epoch,
                    state = ?inner.state,
                    "Ignoring stale authorization failure"
                );
                return false;
            }
            inner.state = SessionState::Unauthenticated;
            inner.session = None;
        }

        self.discard_persisted();
        tracing::warn!(epoch, "Session invalidated by authorization failure");
        self.emit(SessionEvent::Invalidated { epoch });
        true
    }

    // ========== Transitions ==========

    /// Clear the session and persisted token. No network call.
    pub fn logout(&self) {
        {
            let mut inner = self.inner.write();
            inner.state = SessionState::Unauthenticated;
            inner.session = None;
            inner.pending_token = None;
            inner.attempt += 1;
        }
        self.discard_persisted();
        tracing::info!("Logged out");
        self.emit(SessionEvent::LoggedOut);
    }

    /// Sign in, persist the token, then confirm the profile with `/auth/me`.
    ///
    /// Any failure leaves the store `Unauthenticated` with nothing persisted.
    pub async fn login(&self, auth: &AuthApi, username: &str, password: &str) -> ClientResult<Identity> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "username and password are required".into(),
            ));
        }

        let attempt = self.begin_attempt(None);
        tracing::info!(username = %username, "Signing in");

        match self.run_login(auth, attempt, username, password).await {
            Ok(identity) => Ok(identity),
            Err(e) => {
                if self.abort(attempt) {
                    self.discard_persisted();
                }
                tracing::warn!(username = %username, error = %e, "Sign-in failed");
                Err(e)
            }
        }
    }

    async fn run_login(
        &self,
        auth: &AuthApi,
        attempt: u64,
        username: &str,
        password: &str,
    ) -> ClientResult<Identity> {
        let response = auth.sign_in(&LoginRequest::new(username, password)).await?;
        if !self.set_pending_token(attempt, &response.token) {
            return Err(superseded());
        }
        // sign-in profile is a placeholder until /auth/me answers
        self.storage.save(&PersistedSession::new(
            response.token.clone(),
            Some(response.profile_hint()),
        ))?;

        let identity = auth.me().await?;
        let epoch = self.complete(attempt, identity.clone(), response.token.clone())?;
        self.persist_profile(&response.token, &identity);

        tracing::info!(username = %identity.username, role = %identity.role, epoch, "Signed in");
        Ok(identity)
    }

    /// Re-validate a persisted token at startup. Single attempt; on any
    /// failure the token is discarded.
    pub async fn restore(&self, auth: &AuthApi) -> Option<Identity> {
        let Some(persisted) = self.storage.load() else {
            tracing::debug!("No persisted session");
            return None;
        };

        let attempt = self.begin_attempt(Some(persisted.token.clone()));
        match auth.me().await {
            Ok(identity) => {
                let epoch = self
                    .complete(attempt, identity.clone(), persisted.token.clone())
                    .ok()?;
                self.persist_profile(&persisted.token, &identity);
                tracing::info!(username = %identity.username, epoch, "Session restored");
                Some(identity)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Persisted session rejected, discarding");
                if self.abort(attempt) {
                    self.discard_persisted();
                }
                None
            }
        }
    }

    fn begin_attempt(&self, token: Option<String>) -> u64 {
        let mut inner = self.inner.write();
        inner.attempt += 1;
        inner.state = SessionState::Authenticating;
        inner.session = None;
        inner.pending_token = token;
        inner.attempt
    }

    fn set_pending_token(&self, attempt: u64, token: &str) -> bool {
        let mut inner = self.inner.write();
        if inner.attempt != attempt || inner.state != SessionState::Authenticating {
            return false;
        }
        inner.pending_token = Some(token.to_string());
        true
    }

    fn complete(&self, attempt: u64, identity: Identity, token: String) -> ClientResult<u64> {
        let (username, epoch) = {
            let mut inner = self.inner.write();
            if inner.attempt != attempt || inner.state != SessionState::Authenticating {
                return Err(superseded());
            }
            inner.epoch += 1;
            let epoch = inner.epoch;
            let username = identity.username.clone();
            inner.session = Some(Session {
                identity,
                token,
                epoch,
            });
            inner.pending_token = None;
            inner.state = SessionState::Authenticated;
            (username, epoch)
        };
        self.emit(SessionEvent::LoggedIn { username, epoch });
        Ok(epoch)
    }

    /// Back to `Unauthenticated` if `attempt` is still the live one
    fn abort(&self, attempt: u64) -> bool {
        let mut inner = self.inner.write();
        if inner.attempt != attempt || inner.state != SessionState::Authenticating {
            return false;
        }
        inner.state = SessionState::Unauthenticated;
        inner.pending_token = None;
        true
    }

    fn persist_profile(&self, token: &str, identity: &Identity) {
        let persisted = PersistedSession::new(token, Some(identity.clone()));
        if let Err(e) = self.storage.save(&persisted) {
            tracing::warn!(error = %e, "Failed to persist session profile");
        }
    }

    fn discard_persisted(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!(path = %self.storage.path().display(), error = %e, "Failed to remove session file");
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!("Session event dropped: no subscribers");
        }
    }
}

fn superseded() -> ClientError {
    tracing::debug!("Authentication attempt superseded");
    ClientError::NotAuthenticated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(TokenStorage::new(dir.path()));
        (dir, store)
    }

    fn identity(role: shared::models::Role) -> Identity {
        Identity {
            user_id: 1,
            username: "someone".into(),
            role,
            display_name: None,
            email: None,
        }
    }

    #[test]
    fn test_initial_state_is_locked_down() {
        let (_dir, store) = store();
        assert_eq!(store.state(), SessionState::Unauthenticated);
        assert!(!store.can_view(View::Dashboard));
        assert!(matches!(
            store.require(Action::RecordTransaction),
            Err(ClientError::NotAuthenticated)
        ));
        assert_eq!(store.ticket(), RequestTicket { token: None, epoch: 0 });
    }

    #[test]
    fn test_capability_matrix_for_staff() {
        let (_dir, store) = store();
        let attempt = store.begin_attempt(Some("tok".into()));
        store
            .complete(attempt, identity(shared::models::Role::Staff), "tok".into())
            .unwrap();

        assert!(store.can_view(View::Reports));
        assert!(!store.can_view(View::Users));
        assert!(store.can(Action::RecordTransaction));
        assert!(matches!(
            store.require(Action::ManageProducts),
            Err(ClientError::PermissionDenied(Action::ManageProducts))
        ));
        assert!(store.require_view(View::Users).is_err());
        assert!(!store.is_admin());
    }

    #[test]
    fn test_pending_token_only_while_authenticating() {
        let (_dir, store) = store();
        let attempt = store.begin_attempt(None);
        assert!(store.set_pending_token(attempt, "fresh"));
        assert_eq!(store.ticket().token.as_deref(), Some("fresh"));
        assert!(!store.invalidate(0));
        assert_eq!(store.state(), SessionState::Authenticating);

        store.logout();
        assert!(!store.set_pending_token(attempt, "late"));
        assert!(store.ticket().token.is_none());
    }

    #[test]
    fn test_invalidate_fires_once_per_epoch() {
        let (_dir, store) = store();
        let mut events = store.subscribe();
        let attempt = store.begin_attempt(Some("tok".into()));
        let epoch = store
            .complete(attempt, identity(shared::models::Role::Admin), "tok".into())
            .unwrap();
        assert_eq!(epoch, 1);
        assert!(store.is_admin());

        assert!(!store.invalidate(epoch - 1));
        assert!(store.invalidate(epoch));
        assert!(!store.invalidate(epoch));
        assert!(!store.is_authenticated());

        assert!(matches!(events.try_recv(), Ok(SessionEvent::LoggedIn { epoch: 1, .. })));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Invalidated { epoch: 1 });
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_stale_attempt_cannot_complete() {
        let (_dir, store) = store();
        let first = store.begin_attempt(None);
        let second = store.begin_attempt(None);
        assert!(store
            .complete(first, identity(shared::models::Role::Admin), "a".into())
            .is_err());
        assert!(!store.abort(first));
        assert_eq!(store.state(), SessionState::Authenticating);
        assert!(store.abort(second));
        assert_eq!(store.state(), SessionState::Unauthenticated);
    }
}
