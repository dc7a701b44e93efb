//! Local persistence: a directory of string-keyed plain-text entries
//!
//! Each key maps to one file holding the serialized value. Record lists are
//! JSON arrays, scalars (salary, email, sync id) are plain text. Missing
//! keys read as `None`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Well-known vault keys
pub const KEY_EXPENSES: &str = "expenses";
pub const KEY_INCOME_ENTRIES: &str = "income_entries";
pub const KEY_SALARY: &str = "salary";
pub const KEY_USER_EMAIL: &str = "user_email";
pub const KEY_SYNC_ID: &str = "sync_id";

/// File-backed key/value store for the ledger and sync identity
#[derive(Debug, Clone)]
pub struct FileVault {
    dir: PathBuf,
}

impl FileVault {
    /// Open a vault at the given directory, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open the default vault
    ///
    /// Uses `KHARCH_DATA_DIR` when set, otherwise the platform data
    /// directory (e.g. ~/.local/share/kharch).
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_dir()?)
    }

    /// Resolve the default vault directory
    pub fn default_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("KHARCH_DATA_DIR") {
            return Ok(PathBuf::from(dir));
        }
        dirs::data_dir()
            .map(|d| d.join("kharch"))
            .ok_or_else(|| Error::Storage("Could not determine data directory".to_string()))
    }

    /// Directory the vault lives in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the value stored under a key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a value under a key, replacing any previous value
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        fs::write(&path, value)?;
        Ok(())
    }

    /// Remove a key; removing a missing key is not an error
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        // Keys are fixed names or derived identifiers; reject anything that
        // would escape the vault directory.
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(Error::Storage(format!("Invalid vault key: {}", key)));
        }
        Ok(self.dir.join(key))
    }
}
