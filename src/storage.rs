//! Persistent token slot.
//!
//! DESIGN
//! ======
//! The bearer token lives outside session state in one named slot
//! (`access_token`). Presence of a token is the only signal checked at
//! startup. Writes are full overwrites and removal is idempotent, so two
//! call sites never need a read-modify-write.
//!
//! `FileTokenStore` backs the CLI (one plain-text file per slot);
//! `MemoryTokenStore` backs tests and embedders that persist elsewhere.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed name of the token slot.
pub const TOKEN_SLOT: &str = "access_token";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("token storage io failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token storage lock poisoned")]
    Poisoned,
}

/// One-slot persistent storage for the bearer token.
pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when anonymous.
    fn load(&self) -> Option<String>;

    /// Overwrite the slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot cannot be written.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Empty the slot. Clearing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot exists but cannot be removed.
    fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token, as if persisted by a previous run.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { slot: Mutex::new(Some(token.to_owned())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Token persisted as `<dir>/access_token`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(TOKEN_SLOT) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() { None } else { Some(token.to_owned()) }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut file = open_private(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(token.as_bytes()).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Open the slot for a full overwrite, readable by the owner only.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten slots left by older runs.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
