//! File-backed key/value persistence for the document store.
//!
//! Two fixed keys live under the configured data directory: the resume
//! document as one JSON blob and the theme preference as a plain string.
//! Reads never fail outward — missing or unparsable data yields defaults and
//! a debug log. Writes return an explicit `Result` so the store decides,
//! visibly, to log and carry on.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::models::resume::ResumeDocument;
use crate::models::theme::ThemePreference;

/// Fixed storage key for the serialized resume document.
pub const RESUME_KEY: &str = "resume.json";
/// Fixed storage key for the theme preference string.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStorage { dir })
    }

    /// Loads the persisted resume document.
    ///
    /// `None` means "start from defaults": the key is absent or its content
    /// does not deserialize. Neither case is surfaced to callers.
    pub fn load_document(&self) -> Option<ResumeDocument> {
        let path = self.dir.join(RESUME_KEY);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("no persisted resume at {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(doc) => Some(doc),
            Err(e) => {
                debug!("persisted resume is unparsable, using defaults: {e}");
                None
            }
        }
    }

    /// Serializes and writes the full document under the resume key.
    pub fn save_document(&self, doc: &ResumeDocument) -> Result<(), StorageError> {
        let json = serde_json::to_vec(doc)?;
        fs::write(self.dir.join(RESUME_KEY), json)?;
        Ok(())
    }

    /// Loads the theme preference; anything missing or unrecognized is
    /// `System`.
    pub fn load_theme(&self) -> ThemePreference {
        match fs::read_to_string(self.dir.join(THEME_KEY)) {
            Ok(raw) => ThemePreference::parse(&raw),
            Err(_) => ThemePreference::default(),
        }
    }

    pub fn save_theme(&self, theme: ThemePreference) -> Result<(), StorageError> {
        fs::write(self.dir.join(THEME_KEY), theme.as_str())?;
        Ok(())
    }
}
