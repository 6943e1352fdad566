//! File-backed session storage.
//!
//! Persists each key as its own file under the state directory, mirroring
//! the dashboard's browser-storage layout: `access_token`, `refresh_token`,
//! `user.json`, and `theme`. A partially present triple reads back as no
//! session, so the all-or-nothing session invariant holds across restarts.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::SessionStore;
use crate::session::{AuthUser, Session, Theme};

/// Persisted key filenames.
const ACCESS_TOKEN_FILE: &str = "access_token";
const REFRESH_TOKEN_FILE: &str = "refresh_token";
const USER_FILE: &str = "user.json";
const THEME_FILE: &str = "theme";

/// File-backed [`SessionStore`].
pub struct FileStore {
    dir: PathBuf,
    /// Serializes multi-file writes so in-process readers never observe a
    /// torn triple.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create state dir {}", dir.display()))?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_key(&self, name: &str) -> Option<String> {
        match fs::read_to_string(self.path(name)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key = name, error = %e, "failed to read state file");
                None
            }
        }
    }

    fn remove_key(&self, name: &str) -> Result<()> {
        match fs::remove_file(self.path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove state file {name}")),
        }
    }
}

impl SessionStore for FileStore {
    fn session(&self) -> Option<Session> {
        let access_token = self.read_key(ACCESS_TOKEN_FILE)?;
        let refresh_token = self.read_key(REFRESH_TOKEN_FILE)?;
        let user_json = self.read_key(USER_FILE)?;

        let user: AuthUser = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "stored user object is unreadable; treating session as absent");
                return None;
            }
        };

        Some(Session {
            access_token,
            refresh_token,
            user,
        })
    }

    fn set_session(&self, session: &Session) -> Result<()> {
        let _guard = self.write_lock.lock();

        let user =
            serde_json::to_string(&session.user).context("failed to serialize user object")?;
        fs::write(self.path(USER_FILE), user).context("failed to write user object")?;
        fs::write(self.path(REFRESH_TOKEN_FILE), &session.refresh_token)
            .context("failed to write refresh token")?;
        fs::write(self.path(ACCESS_TOKEN_FILE), &session.access_token)
            .context("failed to write access token")?;

        debug!(user_id = %session.user.id, "session stored");
        Ok(())
    }

    fn update_tokens(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()> {
        let _guard = self.write_lock.lock();

        if !self.path(USER_FILE).exists() {
            anyhow::bail!("no session to update");
        }
        if let Some(refresh) = refresh_token {
            fs::write(self.path(REFRESH_TOKEN_FILE), refresh)
                .context("failed to write refresh token")?;
        }
        fs::write(self.path(ACCESS_TOKEN_FILE), access_token)
            .context("failed to write access token")?;
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        let _guard = self.write_lock.lock();

        self.remove_key(ACCESS_TOKEN_FILE)?;
        self.remove_key(REFRESH_TOKEN_FILE)?;
        self.remove_key(USER_FILE)?;
        debug!("session cleared");
        Ok(())
    }

    fn theme(&self) -> Option<Theme> {
        self.read_key(THEME_FILE)
            .and_then(|value| Theme::parse(value.trim()))
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        fs::write(self.path(THEME_FILE), theme.as_str()).context("failed to write theme")
    }
}
