//! Parsed deck cache keyed by resolved file location.
//!
//! An entry is reused only while the file's modification time and length are
//! unchanged. Anything else triggers a reparse. Failed loads are never cached.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use outline_core::{Card, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl FileStamp {
    fn read(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

struct CachedDeck {
    /// Path the deck was requested under, before canonicalization.
    requested: PathBuf,
    stamp: FileStamp,
    cards: Arc<Vec<Card>>,
}

#[derive(Default)]
pub struct DeckCache {
    entries: Mutex<HashMap<PathBuf, CachedDeck>>,
}

impl DeckCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards of the deck at `path`, parsing it only when it changed.
    ///
    /// A missing or malformed deck is logged and yields no cards.
    pub fn load(&self, path: &Path) -> Arc<Vec<Card>> {
        match self.try_load(path) {
            Ok(cards) => cards,
            Err(err) => {
                tracing::warn!("Could not load outline {}: {}", path.display(), err);
                self.invalidate(path);
                Arc::default()
            }
        }
    }

    fn try_load(&self, path: &Path) -> Result<Arc<Vec<Card>>, ParseError> {
        let key = std::fs::canonicalize(path).map_err(|err| not_found_or_io(path, err))?;
        let stamp = FileStamp::read(&key).map_err(|err| not_found_or_io(path, err))?;

        if let Some(cached) = self.entries().get(&key) {
            if cached.stamp == stamp {
                tracing::debug!("Deck cache hit for {}", key.display());
                return Ok(cached.cards.clone());
            }
        }

        let cards = Arc::new(outline_core::try_parse_path(&key)?);
        tracing::info!("Parsed {} cards from {}", cards.len(), key.display());

        self.entries().insert(
            key,
            CachedDeck {
                requested: path.to_path_buf(),
                stamp,
                cards: cards.clone(),
            },
        );
        Ok(cards)
    }

    /// Drop every entry loaded from `path`, including after the file is gone.
    pub fn invalidate(&self, path: &Path) {
        let canonical = std::fs::canonicalize(path).ok();
        self.entries().retain(|key, cached| {
            key != path && Some(key) != canonical.as_ref() && cached.requested != path
        });
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries().len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, CachedDeck>> {
        // The map is always left consistent, so a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found_or_io(path: &Path, err: std::io::Error) -> ParseError {
    match err.kind() {
        std::io::ErrorKind::NotFound => ParseError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => ParseError::Io(err),
    }
}
