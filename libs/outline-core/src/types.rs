//! Core types for outline flashcards.

use serde::{Deserialize, Serialize};

/// A node of the outline tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineNode {
    /// Raw `text` attribute, `None` when the attribute is absent.
    pub text: Option<String>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node with the given text.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Create a node with text and children.
    pub fn with_children(text: Option<&str>, children: Vec<OutlineNode>) -> Self {
        Self {
            text: text.map(String::from),
            children,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl Drop for OutlineNode {
    // Flatten the subtree so deep outlines are not dropped recursively.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A parsed outline document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineDocument {
    /// Normalized `head/title`, if present and non-empty.
    pub title: Option<String>,
    /// The `body` element as a text-less node whose children are topics.
    pub body: Option<OutlineNode>,
}

/// Flashcard extracted from an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub topic: String,
    pub term: String,
    /// Indentation-prefixed detail lines, e.g. `"  - nested"`.
    pub details: Vec<String>,
}

/// Card without its topic, as listed inside a [`TopicGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCard {
    pub term: String,
    pub details: Vec<String>,
}

impl From<Card> for TermCard {
    fn from(card: Card) -> Self {
        Self {
            term: card.term,
            details: card.details,
        }
    }
}

/// Cards sharing a topic, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGroup {
    pub topic: String,
    pub cards: Vec<TermCard>,
}
