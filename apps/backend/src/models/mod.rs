//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from outline-core
pub use outline_core::types::{Card, TermCard, TopicGroup};

use crate::services::library::LibraryEntry;

// === Card Types ===

/// Flat card list of the active deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardListResponse {
    pub deck: Option<String>,
    pub cards: Vec<Card>,
}

/// Cards of the active deck grouped by topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicListResponse {
    pub deck: Option<String>,
    pub topics: Vec<TopicGroup>,
}

// === File Types ===

/// Uploaded deck file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckFile {
    pub name: String,
    pub title: Option<String>,
    pub size_bytes: u64,
    pub modified_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl DeckFile {
    pub fn from_entry(entry: LibraryEntry, active: bool) -> Self {
        Self {
            name: entry.name,
            title: entry.title,
            size_bytes: entry.size_bytes,
            modified_at: entry.modified_at,
            active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    pub active: Option<String>,
    pub files: Vec<DeckFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file: DeckFile,
    pub card_count: usize,
}

/// Deck the card endpoints read from after a reset or delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveDeckResponse {
    pub active: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectDeckRequest {
    pub name: String,
}
