use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::errors::{StoreError, StoreResult};
use crate::models::UserStore;

/// Load-all / save-all persistence for enrolled users.
///
/// Neither method reports errors to the caller: a failed load yields an
/// empty store and a failed save yields `false`. Both log the cause.
pub trait DescriptorStore: Send + Sync {
    fn load(&self) -> UserStore;

    fn save(&self, users: &UserStore) -> bool;
}

fn parse_document(data: &str) -> StoreResult<UserStore> {
    if data.trim().is_empty() {
        return Ok(UserStore::new());
    }
    Ok(serde_json::from_str(data)?)
}

fn render_document(users: &UserStore) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(users)?)
}

/// Users kept in a single pretty-printed JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store, writing an empty `{}` document if the file does not
    /// exist yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self::new(path);
        store.ensure_exists()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn ensure_exists(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        fs::write(&self.path, "{}").map_err(|e| self.io_error(e))?;
        tracing::info!("Created empty users file at {}", self.path.display());
        Ok(())
    }

    fn read(&self) -> StoreResult<UserStore> {
        let data = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        parse_document(&data)
    }

    fn write(&self, users: &UserStore) -> StoreResult<()> {
        let data = render_document(users)?;
        fs::write(&self.path, data).map_err(|e| self.io_error(e))
    }
}

impl DescriptorStore for JsonFileStore {
    fn load(&self) -> UserStore {
        match self.read() {
            Ok(users) => {
                tracing::debug!("Loaded {} users from {}", users.len(), self.path.display());
                users
            }
            Err(e) => {
                tracing::error!("Error loading users: {}", e);
                UserStore::new()
            }
        }
    }

    fn save(&self, users: &UserStore) -> bool {
        match self.write(users) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error saving users: {}", e);
                false
            }
        }
    }
}

/// In-memory stand-in for [`JsonFileStore`]. It keeps the serialized
/// document rather than the parsed store so it goes through the same
/// parse and render steps.
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<String>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_document("{}")
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(document.into()),
            reject_writes: AtomicBool::new(false),
        }
    }

    /// Make every later `save` fail, as a full disk would.
    pub fn reject_writes(&self) {
        self.reject_writes.store(true, Ordering::SeqCst);
    }

    pub fn document(&self) -> String {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DescriptorStore for MemoryStore {
    fn load(&self) -> UserStore {
        match parse_document(&self.document()) {
            Ok(users) => users,
            Err(e) => {
                tracing::error!("Error loading users: {}", e);
                UserStore::new()
            }
        }
    }

    fn save(&self, users: &UserStore) -> bool {
        if self.reject_writes.load(Ordering::SeqCst) {
            tracing::error!("Error saving users: writes are rejected");
            return false;
        }

        match render_document(users) {
            Ok(data) => {
                *self
                    .document
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner()) = data;
                true
            }
            Err(e) => {
                tracing::error!("Error saving users: {}", e);
                false
            }
        }
    }
}
