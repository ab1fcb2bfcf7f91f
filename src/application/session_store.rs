// Session store - login flag, username and theme kept in local storage
use crate::domain::session::{LOGGED_IN_KEY, Session, THEME_KEY, Theme, USERNAME_KEY};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read local storage: {0}")]
    Read(String),

    #[error("failed to write local storage: {0}")]
    Write(String),
}

/// String key/value storage with no expiry
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn LocalStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    pub fn session(&self) -> Session {
        Session::from_stored(
            self.storage.get(LOGGED_IN_KEY).as_deref(),
            self.storage.get(USERNAME_KEY),
        )
    }

    pub fn login(&self, username: &str) -> Result<Session, StorageError> {
        self.storage.set(LOGGED_IN_KEY, "true")?;
        self.storage.set(USERNAME_KEY, username)?;
        Ok(self.session())
    }

    /// Clears the login flag; the stored username is left in place
    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove(LOGGED_IN_KEY)
    }

    pub fn theme(&self) -> Theme {
        Theme::parse(self.storage.get(THEME_KEY).as_deref())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set(THEME_KEY, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::file_storage::MemoryStorage;

    fn store() -> (SessionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::default());
        (SessionStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_login_persists_flag_and_username() {
        let (sessions, storage) = store();
        let session = sessions.login("ops").unwrap();
        assert!(session.logged_in);
        assert_eq!(storage.get(LOGGED_IN_KEY).as_deref(), Some("true"));
        assert_eq!(storage.get(USERNAME_KEY).as_deref(), Some("ops"));
    }

    #[test]
    fn test_logout_clears_flag_only() {
        let (sessions, storage) = store();
        sessions.login("ops").unwrap();
        sessions.logout().unwrap();
        assert!(!sessions.session().logged_in);
        assert_eq!(storage.get(USERNAME_KEY).as_deref(), Some("ops"));
    }

    #[test]
    fn test_theme_round_trip() {
        let (sessions, _) = store();
        assert_eq!(sessions.theme(), Theme::Light);
        sessions.set_theme(Theme::Dark).unwrap();
        assert_eq!(sessions.theme(), Theme::Dark);
    }
}
