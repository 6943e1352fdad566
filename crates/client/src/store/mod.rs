//! Session state storage.
//!
//! All session reads and writes go through [`SessionStore`]; the HTTP
//! pipeline and the auth service receive the store as an explicit handle so
//! both can be tested against the in-memory implementation.

mod file;

pub use file::FileStore;

use anyhow::Result;
use parking_lot::RwLock;

use crate::session::{Session, Theme};

/// Storage for the session triple and UI preferences.
///
/// A session is stored and removed as a unit; partial triples are never a
/// valid persisted form. `clear_session` is idempotent. The theme
/// preference is independent of the session and survives logout.
pub trait SessionStore: Send + Sync {
    /// The current session, or `None` when absent or partially persisted.
    fn session(&self) -> Option<Session>;

    /// Replace the stored session as a unit.
    fn set_session(&self, session: &Session) -> Result<()>;

    /// Swap in rotated tokens, keeping the cached user.
    ///
    /// Fails when no session is present.
    fn update_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()>;

    /// Remove all stored auth state. Safe to call repeatedly.
    fn clear_session(&self) -> Result<()>;

    /// The persisted theme preference, if any.
    fn theme(&self) -> Option<Theme>;

    /// Persist the theme preference.
    fn set_theme(&self, theme: Theme) -> Result<()>;
}

/// In-memory store for tests and embedded use.
#[derive(Default)]
pub struct MemoryStore {
    session: RwLock<Option<Session>>,
    theme: RwLock<Option<Theme>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    fn set_session(&self, session: &Session) -> Result<()> {
        *self.session.write() = Some(session.clone());
        Ok(())
    }

    fn update_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()> {
        let mut guard = self.session.write();
        let Some(session) = guard.as_mut() else {
            anyhow::bail!("no session to update");
        };
        session.access_token = access_token.to_string();
        if let Some(refresh) = refresh_token {
            session.refresh_token = refresh.to_string();
        }
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        *self.session.write() = None;
        Ok(())
    }

    fn theme(&self) -> Option<Theme> {
        *self.theme.read()
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        *self.theme.write() = Some(theme);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::session::AuthUser;

    fn sample_session() -> Session {
        let user: AuthUser =
            serde_json::from_value(labodc_test_utils::user_json("TALENT")).unwrap();
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            user,
        }
    }

    #[test]
    fn set_then_read_round_trips() {
        let store = MemoryStore::new();
        assert!(store.session().is_none());
        store.set_session(&sample_session()).unwrap();
        let session = store.session().unwrap();
        assert_eq!(session.access_token, "access");
        assert_eq!(session.user.role, "TALENT");
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemoryStore::new();
        store.set_session(&sample_session()).unwrap();
        store.clear_session().unwrap();
        assert!(store.session().is_none());
        store.clear_session().unwrap();
        assert!(store.session().is_none());
    }

    #[test]
    fn update_tokens_keeps_user_and_optionally_refresh() {
        let store = MemoryStore::new();
        store.set_session(&sample_session()).unwrap();

        store.update_tokens("access-2", None).unwrap();
        let session = store.session().unwrap();
        assert_eq!(session.access_token, "access-2");
        assert_eq!(session.refresh_token, "refresh");

        store.update_tokens("access-3", Some("refresh-2")).unwrap();
        let session = store.session().unwrap();
        assert_eq!(session.refresh_token, "refresh-2");
        assert_eq!(session.user.name, "Test Talent");
    }

    #[test]
    fn update_tokens_without_session_fails() {
        let store = MemoryStore::new();
        assert!(store.update_tokens("access", None).is_err());
    }

    #[test]
    fn theme_survives_session_clear() {
        let store = MemoryStore::new();
        store.set_theme(Theme::Dark).unwrap();
        store.set_session(&sample_session()).unwrap();
        store.clear_session().unwrap();
        assert_eq!(store.theme(), Some(Theme::Dark));
    }
}
