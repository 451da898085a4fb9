//! Outline flashcard library shared by the backend.
//!
//! Provides:
//! - OPML reader producing an outline tree
//! - Card extraction (topic → term → indented detail lines)
//! - Grouping of cards by topic
//! - Shared types (Card, TopicGroup, OutlineNode, etc.)

pub mod deck;
pub mod document;
pub mod error;
pub mod parser;
pub mod text;
pub mod types;

pub use deck::group_by_topic;
pub use document::{decode, read_document, read_document_bytes};
pub use error::{ParseError, Result};
pub use parser::{
    assemble_cards, extract_details, parse_path, parse_reader, try_parse_bytes, try_parse_path,
    try_parse_reader, try_parse_str,
};
pub use text::normalize_text;
pub use types::{Card, OutlineDocument, OutlineNode, TermCard, TopicGroup};
