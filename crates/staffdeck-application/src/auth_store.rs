//! Authentication state container.
//!
//! Owns the session lifecycle: logged-out, logging-in, logged-in,
//! logging-out. Mirrors token and user into session-scoped storage and
//! publishes the token to the shared cell the HTTP client reads from.

use crate::OpStatus;
use staffdeck_core::auth::{AuthApi, Session};
use staffdeck_core::storage::{KEY_TOKEN, KEY_USER, KeyValueStore, read_json, write_json};
use staffdeck_core::user::UserProfile;
use staffdeck_infrastructure::TokenCell;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const LOGIN_FALLBACK: &str = "Login failed";

/// Lifecycle phase of the authentication state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPhase {
    /// No session; `AuthState::error` may carry the last failure.
    LoggedOut,
    /// A login request is in flight.
    LoggingIn,
    /// An authenticated session exists.
    LoggedIn(Session),
    /// A logout request is in flight; local de-auth is already decided.
    LoggingOut,
}

/// Snapshot of the auth store's state, as the view layer reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub phase: AuthPhase,
    /// Last login failure message, cleared on the next login attempt or
    /// by `clear_error`.
    pub error: Option<String>,
}

/// Dependency-injected authentication store.
///
/// Owned by the application root and passed by reference to the view
/// layer; there is no ambient singleton. Session storage is a cache of
/// the last server response, never the source of truth.
pub struct AuthStore {
    api: Arc<dyn AuthApi>,
    session_store: Arc<dyn KeyValueStore>,
    token: TokenCell,
    state: Arc<RwLock<AuthState>>,
}

impl AuthStore {
    /// Creates the store and hydrates it from session storage.
    ///
    /// The initial phase is `LoggedIn` only when both token and user are
    /// present and parseable; anything partial or corrupt hydrates as
    /// `LoggedOut`. A hydrated token is seeded into the shared token cell
    /// so requests are authenticated immediately after a restart.
    pub async fn new(
        api: Arc<dyn AuthApi>,
        session_store: Arc<dyn KeyValueStore>,
        token: TokenCell,
    ) -> Self {
        let phase = match Self::hydrate(session_store.as_ref()).await {
            Some(session) => {
                token.set(session.token.clone()).await;
                debug!(username = %session.user.username, "session restored from storage");
                AuthPhase::LoggedIn(session)
            }
            None => AuthPhase::LoggedOut,
        };
        Self {
            api,
            session_store,
            token,
            state: Arc::new(RwLock::new(AuthState { phase, error: None })),
        }
    }

    async fn hydrate(store: &dyn KeyValueStore) -> Option<Session> {
        let token = store.read(KEY_TOKEN).await?;
        let user: UserProfile = read_json(store, KEY_USER).await?;
        Some(Session { token, user })
    }

    /// Logs in with the given credentials.
    ///
    /// Transitions to `LoggingIn` (clearing any prior error), exchanges
    /// credentials for a token, then resolves the profile for that token.
    /// On success the token is published to the shared cell and the pair
    /// is mirrored into session storage. On failure the store lands in
    /// `LoggedOut` with the server's message (or the generic fallback)
    /// and nothing is persisted.
    ///
    /// Concurrent logins are not coordinated; the last to resolve wins.
    /// A cancelled login backs out to `LoggedOut` without applying the
    /// response, even if the response had already arrived.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> OpStatus {
        {
            let mut state = self.state.write().await;
            state.phase = AuthPhase::LoggingIn;
            state.error = None;
        }

        let outcome = tokio::select! {
            _ = cancel.cancelled() => return self.abandon_login().await,
            outcome = self.authenticate(username, password) => outcome,
        };
        if cancel.is_cancelled() {
            return self.abandon_login().await;
        }

        match outcome {
            Ok(session) => {
                self.token.set(session.token.clone()).await;
                self.session_store
                    .write(KEY_TOKEN, &session.token)
                    .await;
                if let Err(err) =
                    write_json(self.session_store.as_ref(), KEY_USER, &session.user).await
                {
                    warn!(%err, "failed to mirror user profile into session storage");
                }
                let mut state = self.state.write().await;
                state.phase = AuthPhase::LoggedIn(session);
                state.error = None;
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.phase = AuthPhase::LoggedOut;
                state.error = Some(err.display_message(LOGIN_FALLBACK));
            }
        }
        OpStatus::Completed
    }

    /// A cancelled login backs out to `LoggedOut` without applying the
    /// response or recording an error.
    async fn abandon_login(&self) -> OpStatus {
        let mut state = self.state.write().await;
        if state.phase == AuthPhase::LoggingIn {
            state.phase = AuthPhase::LoggedOut;
        }
        OpStatus::Cancelled
    }

    /// The two-step exchange: token first, then the profile it belongs
    /// to. The fresh token is passed explicitly because the shared cell
    /// is only updated once the whole exchange has succeeded.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> staffdeck_core::Result<Session> {
        let token = self.api.login(username, password).await?;
        let user = self.api.me(&token).await?;
        Ok(Session { token, user })
    }

    /// Logs out.
    ///
    /// Only valid from `LoggedIn`; anywhere else it is a no-op. Issues
    /// the server-side logout, then de-authenticates locally whether or
    /// not the server call succeeded: token cell and session storage are
    /// cleared and the store lands in `LoggedOut`. Fail-open, since the
    /// alternative is a stuck authenticated UI with no server session.
    /// Not cancellable for the same reason.
    pub async fn logout(&self) {
        {
            let mut state = self.state.write().await;
            if !matches!(state.phase, AuthPhase::LoggedIn(_)) {
                return;
            }
            state.phase = AuthPhase::LoggingOut;
        }

        let result = self.api.logout().await;

        self.token.clear().await;
        self.session_store.clear().await;

        let mut state = self.state.write().await;
        state.phase = AuthPhase::LoggedOut;
        match result {
            Ok(()) => state.error = None,
            Err(err) => warn!(%err, "server-side logout failed; session cleared locally"),
        }
    }

    /// Clears the error field without touching the phase.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// The current session, if logged in.
    pub async fn session(&self) -> Option<Session> {
        match &self.state.read().await.phase {
            AuthPhase::LoggedIn(session) => Some(session.clone()),
            _ => None,
        }
    }

    /// Whether a login or logout request is in flight.
    pub async fn is_busy(&self) -> bool {
        matches!(
            self.state.read().await.phase,
            AuthPhase::LoggingIn | AuthPhase::LoggingOut
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockAuthApi;
    use staffdeck_core::error::StaffdeckError;
    use staffdeck_core::storage::KEY_EMPLOYEES;
    use staffdeck_infrastructure::{MemoryStore, TokenCell};

    fn profile(username: &str) -> UserProfile {
        use chrono::TimeZone;
        UserProfile {
            id: 1,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: "admin".to_string(),
            is_active: true,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    async fn store_with(api: MockAuthApi) -> (AuthStore, Arc<MemoryStore>, TokenCell) {
        let session = Arc::new(MemoryStore::new());
        let token = TokenCell::new();
        let store = AuthStore::new(Arc::new(api), session.clone(), token.clone()).await;
        (store, session, token)
    }

    #[tokio::test]
    async fn test_starts_logged_out_with_empty_storage() {
        let (store, _, token) = store_with(MockAuthApi::default()).await;
        let state = store.state().await;
        assert_eq!(state.phase, AuthPhase::LoggedOut);
        assert_eq!(state.error, None);
        assert_eq!(token.get().await, None);
    }

    #[tokio::test]
    async fn test_login_success_populates_state_storage_and_token_cell() {
        let api = MockAuthApi::default();
        api.push_login(Ok("tok-1".to_string()));
        api.push_me(Ok(profile("admin")));
        let (store, session, token) = store_with(api).await;

        let status = store
            .login("admin", "secret", &CancellationToken::new())
            .await;
        assert_eq!(status, OpStatus::Completed);

        let state = store.state().await;
        match state.phase {
            AuthPhase::LoggedIn(session) => {
                assert_eq!(session.token, "tok-1");
                assert_eq!(session.user.username, "admin");
            }
            other => panic!("expected LoggedIn, got {other:?}"),
        }
        assert_eq!(state.error, None);
        assert_eq!(token.get().await, Some("tok-1".to_string()));
        assert_eq!(session.read(KEY_TOKEN).await, Some("tok-1".to_string()));
        let stored: Option<UserProfile> = read_json(session.as_ref(), KEY_USER).await;
        assert_eq!(stored.unwrap().username, "admin");
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_detail() {
        let api = MockAuthApi::default();
        api.push_login(Err(StaffdeckError::api(401, "Incorrect username or password")));
        let (store, session, token) = store_with(api).await;

        store
            .login("admin", "wrong", &CancellationToken::new())
            .await;

        let state = store.state().await;
        assert_eq!(state.phase, AuthPhase::LoggedOut);
        assert_eq!(
            state.error,
            Some("Incorrect username or password".to_string())
        );
        assert_eq!(token.get().await, None);
        assert_eq!(session.read(KEY_TOKEN).await, None);
    }

    #[tokio::test]
    async fn test_login_failure_without_detail_uses_fallback() {
        let api = MockAuthApi::default();
        api.push_login(Err(StaffdeckError::transport("")));
        let (store, _, _) = store_with(api).await;

        store.login("admin", "x", &CancellationToken::new()).await;
        assert_eq!(store.state().await.error, Some("Login failed".to_string()));
    }

    #[tokio::test]
    async fn test_login_failure_on_me_step_does_not_persist_partial_session() {
        // Token granted but profile fetch fails: no partial state may leak.
        let api = MockAuthApi::default();
        api.push_login(Ok("tok-1".to_string()));
        api.push_me(Err(StaffdeckError::api(500, "")));
        let (store, session, token) = store_with(api).await;

        store.login("admin", "secret", &CancellationToken::new()).await;

        assert_eq!(store.state().await.phase, AuthPhase::LoggedOut);
        assert_eq!(token.get().await, None);
        assert_eq!(session.read(KEY_TOKEN).await, None);
        assert_eq!(session.read(KEY_USER).await, None);
    }

    #[tokio::test]
    async fn test_login_clears_previous_error() {
        let api = MockAuthApi::default();
        api.push_login(Err(StaffdeckError::api(401, "nope")));
        api.push_login(Ok("tok-2".to_string()));
        api.push_me(Ok(profile("admin")));
        let (store, _, _) = store_with(api).await;

        store.login("admin", "wrong", &CancellationToken::new()).await;
        assert!(store.state().await.error.is_some());

        store.login("admin", "right", &CancellationToken::new()).await;
        assert_eq!(store.state().await.error, None);
    }

    #[tokio::test]
    async fn test_cancelled_login_applies_nothing() {
        let api = MockAuthApi::default();
        api.push_login(Ok("tok-1".to_string()));
        api.push_me(Ok(profile("admin")));
        let (store, session, token) = store_with(api).await;

        let cancel = CancellationToken::new();
        cancel.cancel();
        let status = store.login("admin", "secret", &cancel).await;

        assert_eq!(status, OpStatus::Cancelled);
        assert_eq!(token.get().await, None);
        assert_eq!(session.read(KEY_TOKEN).await, None);
        assert!(store.session().await.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_server_fails() {
        let api = MockAuthApi::default();
        api.push_login(Ok("tok-1".to_string()));
        api.push_me(Ok(profile("admin")));
        api.push_logout(Err(StaffdeckError::api(500, "boom")));
        let (store, session, token) = store_with(api).await;

        store.login("admin", "secret", &CancellationToken::new()).await;
        store.logout().await;

        assert_eq!(store.state().await.phase, AuthPhase::LoggedOut);
        assert_eq!(token.get().await, None);
        assert_eq!(session.read(KEY_TOKEN).await, None);
        assert_eq!(session.read(KEY_USER).await, None);
    }

    #[tokio::test]
    async fn test_logout_success_clears_error_too() {
        let api = MockAuthApi::default();
        api.push_login(Ok("tok-1".to_string()));
        api.push_me(Ok(profile("admin")));
        api.push_logout(Ok(()));
        let (store, _, _) = store_with(api).await;

        store.login("admin", "secret", &CancellationToken::new()).await;
        store.logout().await;

        let state = store.state().await;
        assert_eq!(state.phase, AuthPhase::LoggedOut);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_hydration_restores_session_and_token_cell() {
        let session = Arc::new(MemoryStore::new());
        session.write(KEY_TOKEN, "tok-old").await;
        write_json(session.as_ref(), KEY_USER, &profile("admin"))
            .await
            .unwrap();

        let token = TokenCell::new();
        let store = AuthStore::new(
            Arc::new(MockAuthApi::default()),
            session.clone(),
            token.clone(),
        )
        .await;

        match store.state().await.phase {
            AuthPhase::LoggedIn(s) => assert_eq!(s.token, "tok-old"),
            other => panic!("expected LoggedIn, got {other:?}"),
        }
        assert_eq!(token.get().await, Some("tok-old".to_string()));
    }

    #[tokio::test]
    async fn test_hydration_requires_both_token_and_user() {
        let session = Arc::new(MemoryStore::new());
        session.write(KEY_TOKEN, "tok-old").await;
        // user key absent: a token alone is not a session

        let store = AuthStore::new(
            Arc::new(MockAuthApi::default()),
            session,
            TokenCell::new(),
        )
        .await;
        assert_eq!(store.state().await.phase, AuthPhase::LoggedOut);
    }

    #[tokio::test]
    async fn test_hydration_ignores_corrupt_user_payload() {
        let session = Arc::new(MemoryStore::new());
        session.write(KEY_TOKEN, "tok-old").await;
        session.write(KEY_USER, "{broken").await;

        let store = AuthStore::new(
            Arc::new(MockAuthApi::default()),
            session,
            TokenCell::new(),
        )
        .await;
        assert_eq!(store.state().await.phase, AuthPhase::LoggedOut);
    }

    #[tokio::test]
    async fn test_clear_error_leaves_phase_alone() {
        let api = MockAuthApi::default();
        api.push_login(Err(StaffdeckError::api(401, "nope")));
        let (store, _, _) = store_with(api).await;

        store.login("admin", "wrong", &CancellationToken::new()).await;
        store.clear_error().await;

        let state = store.state().await;
        assert_eq!(state.error, None);
        assert_eq!(state.phase, AuthPhase::LoggedOut);
    }

    #[tokio::test]
    async fn test_logout_clears_the_whole_session_scope() {
        // clear() empties every key in the scope, not just token and user
        let api = MockAuthApi::default();
        api.push_login(Ok("tok-1".to_string()));
        api.push_me(Ok(profile("admin")));
        api.push_logout(Ok(()));
        let session = Arc::new(MemoryStore::new());
        let store =
            AuthStore::new(Arc::new(api), session.clone(), TokenCell::new()).await;

        store.login("admin", "secret", &CancellationToken::new()).await;
        session.write(KEY_EMPLOYEES, "[]").await;
        store.logout().await;
        assert_eq!(session.read(KEY_EMPLOYEES).await, None);
    }

    #[tokio::test]
    async fn test_logout_while_logged_out_is_a_no_op() {
        // no logout response queued: reaching the server would panic the
        // mock, and the session scope must stay untouched
        let session = Arc::new(MemoryStore::new());
        let store = AuthStore::new(
            Arc::new(MockAuthApi::default()),
            session.clone(),
            TokenCell::new(),
        )
        .await;

        session.write(KEY_EMPLOYEES, "[]").await;
        store.logout().await;

        assert_eq!(store.state().await.phase, AuthPhase::LoggedOut);
        assert_eq!(session.read(KEY_EMPLOYEES).await, Some("[]".to_string()));
    }
}
