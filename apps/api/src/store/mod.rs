//! Form state store — the single source of truth for the resume document.
//!
//! Contract: `get` / `set(patch)` / `reset`, plus the independently persisted
//! theme preference. Every mutation writes the full document through to
//! storage synchronously; a failed write keeps the in-memory state and logs,
//! it never propagates. Held locks never cross an `.await`.

pub mod handlers;
mod persistence;

pub use persistence::{FileStorage, StorageError, RESUME_KEY, THEME_KEY};

use parking_lot::RwLock;
use tracing::warn;

use crate::models::resume::{DocumentPatch, ResumeDocument};
use crate::models::theme::ThemePreference;

pub struct DocumentStore {
    document: RwLock<ResumeDocument>,
    theme: RwLock<ThemePreference>,
    storage: FileStorage,
}

impl DocumentStore {
    /// Opens the store, loading persisted state or falling back to defaults.
    pub fn open(storage: FileStorage) -> Self {
        let document = storage.load_document().unwrap_or_default();
        let theme = storage.load_theme();
        DocumentStore {
            document: RwLock::new(document),
            theme: RwLock::new(theme),
            storage,
        }
    }

    /// Returns a snapshot of the current document.
    pub fn get(&self) -> ResumeDocument {
        self.document.read().clone()
    }

    /// Shallow-merges the patch at each provided top-level key, persists the
    /// full document, and returns the updated snapshot.
    pub fn set(&self, patch: DocumentPatch) -> ResumeDocument {
        let snapshot = {
            let mut doc = self.document.write();
            patch.apply_to(&mut doc);
            doc.clone()
        };
        self.persist(&snapshot);
        snapshot
    }

    /// Restores the hard-coded defaults and persists them.
    pub fn reset(&self) -> ResumeDocument {
        let snapshot = {
            let mut doc = self.document.write();
            *doc = ResumeDocument::default();
            doc.clone()
        };
        self.persist(&snapshot);
        snapshot
    }

    /// Applies `mutate` under the write lock. When it reports `true` the
    /// change is kept and persisted; on `false` nothing is written and the
    /// caller gets `None`. `mutate` must leave the document untouched in the
    /// `false` case.
    pub fn try_update<F>(&self, mutate: F) -> Option<ResumeDocument>
    where
        F: FnOnce(&mut ResumeDocument) -> bool,
    {
        let snapshot = {
            let mut doc = self.document.write();
            if !mutate(&mut doc) {
                return None;
            }
            doc.clone()
        };
        self.persist(&snapshot);
        Some(snapshot)
    }

    pub fn theme(&self) -> ThemePreference {
        *self.theme.read()
    }

    pub fn set_theme(&self, theme: ThemePreference) -> ThemePreference {
        *self.theme.write() = theme;
        if let Err(e) = self.storage.save_theme(theme) {
            warn!("theme persistence failed, keeping in-memory value: {e}");
        }
        theme
    }

    fn persist(&self, doc: &ResumeDocument) {
        // The write-through is best effort: losing persistence must never
        // break an edit that already succeeded in memory.
        if let Err(e) = self.storage.save_document(doc) {
            warn!("resume persistence failed, keeping in-memory state: {e}");
        }
    }
}
