//! Auth endpoints and session lifecycle.
//!
//! Thin typed wrappers over the backend's auth surface. The session triple
//! is created on login, rotated by the refresh pipeline, and destroyed on
//! logout or irrecoverable refresh failure.

use std::sync::Arc;

use labodc_nav::role::Role;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::session::{AuthUser, Session};
use crate::store::SessionStore;

/// Login request body.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    mail: &'a str,
    password: &'a str,
}

/// Login success payload: the full session triple.
#[derive(Debug, Deserialize)]
struct LoginPayload {
    access_token: String,
    refresh_token: String,
    user: AuthUser,
}

/// Auth operations over the API client and its session store.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn store(&self) -> &Arc<dyn SessionStore> {
        self.api.store()
    }

    /// Authenticate against the backend and store the session triple.
    ///
    /// Login happens before any session exists, so it bypasses the refresh
    /// stage; invalid credentials surface as a normalized API error rather
    /// than a terminal session failure.
    pub async fn login(&self, mail: &str, password: &str) -> ClientResult<AuthUser> {
        let payload: LoginPayload = self
            .api
            .post_raw("/auth/login", &LoginRequest { mail, password })
            .await?;

        let session = Session {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
            user: payload.user,
        };
        self.store()
            .set_session(&session)
            .map_err(ClientError::Internal)?;

        info!(user_id = %session.user.id, role = %session.user.role, "logged in");
        Ok(session.user)
    }

    /// End the session: best-effort server logout, then clear local state
    /// unconditionally.
    pub async fn logout(&self) -> ClientResult<()> {
        if self.store().session().is_some()
            && let Err(e) = self
                .api
                .post::<_, serde_json::Value>("/auth/logout", &serde_json::json!({}))
                .await
        {
            warn!(error = %e.message(), "server logout failed; clearing local state anyway");
        }

        self.store()
            .clear_session()
            .map_err(ClientError::Internal)?;
        info!("logged out");
        Ok(())
    }

    /// Fetch the authenticated user's profile and refresh the cached copy.
    pub async fn me(&self) -> ClientResult<AuthUser> {
        let user: AuthUser = self.api.get("/users/me").await?;
        if let Some(mut session) = self.store().session() {
            session.user = user.clone();
            self.store()
                .set_session(&session)
                .map_err(ClientError::Internal)?;
        }
        Ok(user)
    }

    /// The cached user, when a session is present.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.store().session().map(|s| s.user)
    }

    /// The session role; `None` when logged out or the backend sent an
    /// unknown role identifier.
    pub fn role(&self) -> Option<Role> {
        self.current_user().and_then(|user| user.role())
    }

    /// Whether an authenticated session is present.
    pub fn is_authenticated(&self) -> bool {
        self.store().session().is_some()
    }
}
