//! Upload directory holding outline decks.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("invalid deck file name: {0}")]
    InvalidName(String),
    #[error("deck not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const ALLOWED_EXTENSIONS: [&str; 2] = ["opml", "xml"];
const MAX_NAME_LEN: usize = 255;

/// Metadata of a stored deck file.
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    pub name: String,
    pub path: PathBuf,
    pub title: Option<String>,
    pub size_bytes: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Flat directory of uploaded outline files, addressed by bare file name.
pub struct Library {
    dir: PathBuf,
}

impl Library {
    /// Open the library, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check that `name` is a bare `.opml`/`.xml` file name.
    pub fn validate_name(name: &str) -> Result<(), LibraryError> {
        let invalid = || LibraryError::InvalidName(name.to_string());

        if name.is_empty()
            || name.len() > MAX_NAME_LEN
            || name.starts_with('.')
            || name.contains(['/', '\\'])
            || name.contains("..")
            || name.chars().any(char::is_control)
        {
            return Err(invalid());
        }

        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(invalid)?;

        if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            Ok(())
        } else {
            Err(invalid())
        }
    }

    /// Path a deck with this name is stored at.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, LibraryError> {
        Self::validate_name(name)?;
        Ok(self.dir.join(name))
    }

    /// Resolve the name of an existing deck to its path.
    pub async fn resolve(&self, name: &str) -> Result<PathBuf, LibraryError> {
        let path = self.path_for(name)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(LibraryError::NotFound(name.to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(LibraryError::NotFound(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Store a deck, replacing any existing file of the same name.
    ///
    /// The content is written to a hidden temporary file first and then
    /// renamed, so readers never see a partial deck.
    pub async fn save(&self, name: &str, content: &[u8]) -> Result<PathBuf, LibraryError> {
        let path = self.path_for(name)?;
        let staging = self.dir.join(format!(".{}.part", name));

        tokio::fs::write(&staging, content).await?;
        if let Err(err) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(err.into());
        }

        tracing::info!("Stored deck {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }

    /// Delete a stored deck, returning the path it occupied.
    pub async fn remove(&self, name: &str) -> Result<PathBuf, LibraryError> {
        let path = self.resolve(name).await?;
        tokio::fs::remove_file(&path).await?;
        tracing::info!("Removed deck {}", path.display());
        Ok(path)
    }

    /// Metadata for a single deck.
    pub async fn entry(&self, name: &str) -> Result<LibraryEntry, LibraryError> {
        let path = self.resolve(name).await?;
        read_entry(name.to_string(), path).await
    }

    /// All stored decks, sorted by name. Files with unsupported names are skipped.
    pub async fn list(&self) -> Result<Vec<LibraryEntry>, LibraryError> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.dir).await?;

        while let Some(item) = dir.next_entry().await? {
            let Ok(name) = item.file_name().into_string() else {
                continue;
            };
            if Self::validate_name(&name).is_err() || !item.file_type().await?.is_file() {
                continue;
            }
            entries.push(read_entry(name, item.path()).await?);
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

async fn read_entry(name: String, path: PathBuf) -> Result<LibraryEntry, LibraryError> {
    let meta = tokio::fs::metadata(&path).await?;
    let title = read_title(&path).await;

    Ok(LibraryEntry {
        name,
        title,
        size_bytes: meta.len(),
        modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
        path,
    })
}

/// OPML head title, if the file is readable and well-formed.
async fn read_title(path: &Path) -> Option<String> {
    let content = tokio::fs::read(path).await.ok()?;
    outline_core::read_document_bytes(&content).ok()?.title
}
