//! Where checkout progress lives between page loads.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use super::wizard::CheckoutWizard;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("session data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<CheckoutWizard>, SessionError>;
    fn save(&self, key: &str, wizard: &CheckoutWizard) -> Result<(), SessionError>;
    fn clear(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, CheckoutWizard>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<CheckoutWizard>, SessionError> {
        Ok(self.sessions.lock().get(key).cloned())
    }

    fn save(&self, key: &str, wizard: &CheckoutWizard) -> Result<(), SessionError> {
        self.sessions.lock().insert(key.to_string(), wizard.clone());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SessionError> {
        self.sessions.lock().remove(key);
        Ok(())
    }
}

/// One JSON file per session key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<CheckoutWizard>, SessionError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, wizard: &CheckoutWizard) -> Result<(), SessionError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(wizard)?)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "Checkout session saved");
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::wizard::tests::billing;

    fn progressed() -> CheckoutWizard {
        let mut wizard = CheckoutWizard::new();
        wizard.submit_billing(billing("560001")).unwrap();
        wizard.submit_services(true, false).unwrap();
        wizard
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().join("sessions")).unwrap();
        assert!(store.load("buyer/1").unwrap().is_none());

        store.save("buyer/1", &progressed()).unwrap();
        assert_eq!(store.load("buyer/1").unwrap(), Some(progressed()));

        store.clear("buyer/1").unwrap();
        store.clear("buyer/1").unwrap();
        assert!(store.load("buyer/1").unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("buyer_1.json"), "{not json").unwrap();
        assert!(matches!(store.load("buyer_1"), Err(SessionError::Corrupt(_))));
    }

    #[test]
    fn memory_store_keeps_sessions_apart() {
        let store = MemorySessionStore::new();
        store.save("a", &progressed()).unwrap();
        assert!(store.load("b").unwrap().is_none());
        assert!(store.load("a").unwrap().is_some());
    }
}
