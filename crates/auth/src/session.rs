//! Session store: the current principal, mirrored to one durable slot.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::Principal;

/// Name of the persisted session slot.
pub const SESSION_KEY: &str = "crudops.session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session slot I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize session record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no platform data directory available for the session slot")]
    NoDataDir,
}

/// One durable key-value slot holding the serialized session record.
pub trait SessionSlot: Send + Sync {
    /// Raw slot contents, `None` if nothing is stored.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Overwrite the slot wholesale.
    fn store(&self, record: &str) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;
}

/// File-backed slot: one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/crudops/<key>.json`, e.g. `~/.local/share/crudops/crudops.session.json`.
    pub fn in_data_dir(key: &str) -> Result<Self, SessionError> {
        let dir = dirs::data_dir().ok_or(SessionError::NoDataDir)?;
        Ok(Self::new(dir.join("crudops").join(format!("{key}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionSlot for FileSlot {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn store(&self, record: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, record).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-memory slot (tests). Clones share the same slot, so a second
/// `SessionStore` built from a clone behaves like a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    inner: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with raw contents (possibly malformed).
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.inner.lock().map(|g| g.clone()).unwrap_or(None)
    }

    fn set(&self, value: Option<String>) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = value;
    }
}

impl SessionSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.contents())
    }

    fn store(&self, record: &str) -> Result<(), SessionError> {
        self.set(Some(record.to_string()));
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.set(None);
        Ok(())
    }
}

/// Holds at most one current [`Principal`] and mirrors it to a slot.
///
/// Memory is authoritative for the running process: slot failures are
/// logged and never undo an in-memory change.
pub struct SessionStore {
    slot: Box<dyn SessionSlot>,
    current: Option<Principal>,
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &self.current.as_ref().map(|p| &p.email))
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// An empty store; call [`SessionStore::init`] to restore a persisted session.
    pub fn new(slot: impl SessionSlot + 'static) -> Self {
        Self {
            slot: Box::new(slot),
            current: None,
        }
    }

    /// Load the persisted session record, if any.
    ///
    /// Absent and malformed records both leave the store empty.
    pub fn init(&mut self) {
        self.current = match self.slot.load() {
            Ok(Some(raw)) => match serde_json::from_str::<Principal>(&raw) {
                Ok(principal) => {
                    tracing::info!(email = %principal.email, "session restored");
                    Some(principal)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed session record");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!("no persisted session");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session slot");
                None
            }
        };
    }

    /// Replace the current principal and overwrite the slot.
    ///
    /// Memory is updated even when the slot write fails.
    pub fn set_principal(&mut self, principal: Principal) -> Result<(), SessionError> {
        let record = serde_json::to_string(&principal);
        self.current = Some(principal);
        self.slot.store(&record?)
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.current.as_ref()
    }

    /// Drop the current principal from memory and from the slot.
    pub fn clear_principal(&mut self) -> Result<(), SessionError> {
        self.current = None;
        self.slot.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use crudops_core::EntityId;

    fn admin() -> Principal {
        Principal {
            id: EntityId::from(1),
            name: "Admin".to_string(),
            email: "admin@crudops.com".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = SessionStore::new(MemorySlot::new());
        store.set_principal(admin()).unwrap();
        assert_eq!(store.principal(), Some(&admin()));
    }

    #[test]
    fn init_restores_persisted_principal() {
        let slot = MemorySlot::new();
        SessionStore::new(slot.clone()).set_principal(admin()).unwrap();

        let mut reloaded = SessionStore::new(slot);
        reloaded.init();
        assert_eq!(reloaded.principal(), Some(&admin()));
    }

    #[test]
    fn clear_then_fresh_init_is_absent() {
        let slot = MemorySlot::new();
        let mut store = SessionStore::new(slot.clone());
        store.set_principal(admin()).unwrap();
        store.clear_principal().unwrap();
        assert_eq!(store.principal(), None);
        assert_eq!(slot.contents(), None);

        let mut reloaded = SessionStore::new(slot);
        reloaded.init();
        assert_eq!(reloaded.principal(), None);
    }

    #[test]
    fn malformed_record_is_treated_as_absent() {
        let mut store = SessionStore::new(MemorySlot::with_contents("{not json"));
        store.init();
        assert_eq!(store.principal(), None);
    }

    #[test]
    fn set_overwrites_previous_principal() {
        let slot = MemorySlot::new();
        let mut store = SessionStore::new(slot.clone());
        store.set_principal(admin()).unwrap();

        let mut user = admin();
        user.id = EntityId::from(2);
        user.role = Role::User;
        store.set_principal(user.clone()).unwrap();

        assert_eq!(store.principal(), Some(&user));
        let persisted: Principal = serde_json::from_str(&slot.contents().unwrap()).unwrap();
        assert_eq!(persisted, user);
    }

    #[test]
    fn file_slot_survives_reload_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested").join("session.json"));

        let mut store = SessionStore::new(slot.clone());
        store.set_principal(admin()).unwrap();
        assert!(slot.path().exists());

        let mut reloaded = SessionStore::new(slot.clone());
        reloaded.init();
        assert_eq!(reloaded.principal(), Some(&admin()));

        reloaded.clear_principal().unwrap();
        assert!(!slot.path().exists());
        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn failed_write_is_reported_but_memory_is_updated() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut store = SessionStore::new(FileSlot::new(blocker.join("session.json")));

        let err = store.set_principal(admin()).unwrap_err();

        assert!(matches!(err, SessionError::Io { .. }), "{err:?}");
        assert_eq!(store.principal(), Some(&admin()));
    }
}
