//! Outline to flashcard extraction.
//!
//! # Format
//! ```xml
//! <opml version="2.0">
//!   <body>
//!     <outline text="Cardiology">          <!-- topic -->
//!       <outline text="MI">                <!-- term -->
//!         <outline text="Causes">          <!-- detail, depth 0 -->
//!           <outline text="Plaque"/>       <!-- detail, depth 1 -->
//!         </outline>
//!       </outline>
//!     </outline>
//!   </body>
//! </opml>
//! ```
//!
//! yields `Card { topic: "Cardiology", term: "MI", details: ["- Causes", "  - Plaque"] }`.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::document::{read_document, read_document_bytes};
use crate::error::{ParseError, Result};
use crate::text::normalize_text;
use crate::types::{Card, OutlineDocument, OutlineNode};

const INDENT: &str = "  ";
const MARKER: &str = "-";

/// Flatten a detail subtree into indented lines, self before children.
///
/// Nodes without text emit nothing, but their children are still visited one
/// level deeper.
pub fn extract_details(node: &OutlineNode, depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack = vec![(node, depth)];

    while let Some((node, depth)) = stack.pop() {
        let text = normalize_text(node.text.as_deref());
        if !text.is_empty() {
            lines.push(format!("{}{} {}", INDENT.repeat(depth), MARKER, text));
        }
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    lines
}

/// Build cards from every topic/term pair under the document body.
pub fn assemble_cards(document: &OutlineDocument) -> Vec<Card> {
    let Some(body) = &document.body else {
        return Vec::new();
    };

    let mut cards = Vec::new();

    for topic_node in &body.children {
        let topic = normalize_text(topic_node.text.as_deref());

        for term_node in &topic_node.children {
            if !term_node.has_children() {
                continue;
            }

            let term = normalize_text(term_node.text.as_deref());
            let details: Vec<String> = term_node
                .children
                .iter()
                .flat_map(|detail| extract_details(detail, 0))
                .filter(|line| !is_hollow(line))
                .collect();

            if !term.is_empty() && !details.is_empty() {
                cards.push(Card {
                    topic: topic.clone(),
                    term,
                    details,
                });
            }
        }
    }

    cards
}

fn is_hollow(line: &str) -> bool {
    line.is_empty() || line == MARKER
}

/// Parse OPML markup into cards.
pub fn try_parse_str(content: &str) -> Result<Vec<Card>> {
    let document = read_document(content)?;
    Ok(assemble_cards(&document))
}

/// Parse raw OPML bytes into cards, honouring a BOM or declared encoding.
pub fn try_parse_bytes(bytes: &[u8]) -> Result<Vec<Card>> {
    let document = read_document_bytes(bytes)?;
    Ok(assemble_cards(&document))
}

/// Parse an OPML stream into cards.
pub fn try_parse_reader<R: Read>(mut reader: R) -> Result<Vec<Card>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    try_parse_bytes(&bytes)
}

/// Parse the OPML file at `path` into cards.
pub fn try_parse_path<P: AsRef<Path>>(path: P) -> Result<Vec<Card>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ParseError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => ParseError::Io(err),
    })?;
    try_parse_reader(BufReader::new(file))
}

/// Parse the OPML file at `path`, logging failures and returning no cards.
pub fn parse_path<P: AsRef<Path>>(path: P) -> Vec<Card> {
    let path = path.as_ref();
    try_parse_path(path).unwrap_or_else(|err| {
        tracing::warn!("Could not load outline {}: {}", path.display(), err);
        Vec::new()
    })
}

/// Parse an OPML stream, logging failures and returning no cards.
pub fn parse_reader<R: Read>(reader: R) -> Vec<Card> {
    try_parse_reader(reader).unwrap_or_else(|err| {
        tracing::warn!("Could not load outline from stream: {}", err);
        Vec::new()
    })
}
