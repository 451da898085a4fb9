//! OPML reader producing an [`OutlineDocument`].
//!
//! Only the parts of OPML the card extractor needs are read: the optional
//! `head/title` and the `outline` elements nested under `body`. Elements are
//! matched by local name, so namespaced documents are accepted.
//!
//! The markup is read as a stream of events and the tree is built on an
//! explicit stack, so nesting depth is bounded by memory, not by the call
//! stack.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ParseError, Result};
use crate::text::normalize_text;
use crate::types::{OutlineDocument, OutlineNode};

const BODY: &[u8] = b"body";
const HEAD: &[u8] = b"head";
const TITLE: &[u8] = b"title";
const OUTLINE: &[u8] = b"outline";
const TEXT_ATTR: &str = "text";

/// Where an open element sits in the OPML structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Root,
    Head,
    Title,
    Body,
    Outline,
    Other,
}

/// Node under construction: its text and the children closed so far.
struct Frame {
    text: Option<String>,
    children: Vec<OutlineNode>,
}

impl Frame {
    fn close(self) -> OutlineNode {
        OutlineNode {
            text: self.text,
            children: self.children,
        }
    }
}

#[derive(Default)]
struct Builder {
    scopes: Vec<Scope>,
    frames: Vec<Frame>,
    seen_root: bool,
    root_closed: bool,
    seen_head: bool,
    seen_body: bool,
    title: Option<String>,
    body: Option<OutlineNode>,
}

impl Builder {
    fn open(&mut self, element: &BytesStart<'_>) -> Result<Scope> {
        if self.root_closed {
            return Err(malformed("junk after document element"));
        }

        let name = element.local_name();
        let scope = match (self.scopes.last(), name.as_ref()) {
            (None, _) => {
                self.seen_root = true;
                Scope::Root
            }
            (Some(Scope::Root), HEAD) if !self.seen_head => {
                self.seen_head = true;
                Scope::Head
            }
            (Some(Scope::Root), BODY) if !self.seen_body => {
                self.seen_body = true;
                Scope::Body
            }
            (Some(Scope::Head), TITLE) if self.title.is_none() => {
                self.title = Some(String::new());
                Scope::Title
            }
            (Some(Scope::Body | Scope::Outline), OUTLINE) => Scope::Outline,
            _ => Scope::Other,
        };

        match scope {
            Scope::Body => self.frames.push(Frame {
                text: None,
                children: Vec::new(),
            }),
            Scope::Outline => {
                let text = match element.try_get_attribute(TEXT_ATTR)? {
                    Some(attr) => Some(attr.unescape_value()?.into_owned()),
                    None => None,
                };
                self.frames.push(Frame {
                    text,
                    children: Vec::new(),
                });
            }
            _ => {}
        }

        Ok(scope)
    }

    fn close(&mut self, scope: Scope) {
        match scope {
            Scope::Outline => {
                let node = self.frames.pop().map(Frame::close);
                if let (Some(node), Some(parent)) = (node, self.frames.last_mut()) {
                    parent.children.push(node);
                }
            }
            Scope::Body => self.body = self.frames.pop().map(Frame::close),
            Scope::Root => self.root_closed = true,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.scopes.last() {
            Some(Scope::Title) => {
                if let Some(title) = self.title.as_mut() {
                    title.push_str(text);
                }
            }
            None if !text.trim().is_empty() => {
                return Err(malformed("text outside the document element"));
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<OutlineDocument> {
        if !self.seen_root {
            return Err(malformed("no element found"));
        }
        if !self.scopes.is_empty() {
            return Err(malformed("unexpected end of document, unclosed element"));
        }

        let title = self
            .title
            .map(|title| normalize_text(Some(&title)))
            .filter(|title| !title.is_empty());

        Ok(OutlineDocument {
            title,
            body: self.body,
        })
    }
}

/// Parse OPML markup into an outline tree.
///
/// A document without a `body` element is valid and has `body: None`.
pub fn read_document(content: &str) -> Result<OutlineDocument> {
    let mut reader = Reader::from_str(content);
    let mut builder = Builder::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|err| malformed_at(reader.buffer_position(), err))?;

        match event {
            Event::Start(element) => {
                let scope = builder.open(&element)?;
                builder.scopes.push(scope);
            }
            Event::Empty(element) => {
                let scope = builder.open(&element)?;
                builder.close(scope);
            }
            Event::End(_) => {
                let scope = builder
                    .scopes
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
                builder.close(scope);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|err| malformed_at(reader.buffer_position(), err))?;
                builder.text(&text)?;
            }
            Event::CData(data) => builder.text(&String::from_utf8_lossy(&data))?,
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

/// Decode raw bytes and parse them as OPML.
pub fn read_document_bytes(bytes: &[u8]) -> Result<OutlineDocument> {
    let content = decode(bytes)?;
    read_document(&content)
}

/// Decode a document using its byte order mark or XML declaration.
///
/// Without either, the content is UTF-8. Bytes that are invalid in the
/// chosen encoding make the document malformed.
pub fn decode(bytes: &[u8]) -> Result<String> {
    let (encoding, bom_len) = match Encoding::for_bom(bytes) {
        Some(found) => found,
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), 0),
    };

    let (content, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        return Err(malformed(&format!("invalid {} data", encoding.name())));
    }
    Ok(content.into_owned())
}

/// Encoding named in the `<?xml ... encoding="..."?>` declaration, if any.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>> {
    let Some(rest) = bytes.strip_prefix(b"<?xml") else {
        return Ok(None);
    };
    let end = rest
        .windows(2)
        .position(|window| window == b"?>")
        .ok_or_else(|| malformed("unterminated XML declaration"))?;
    let declaration = String::from_utf8_lossy(&rest[..end]);

    let Some(label) = pseudo_attribute(&declaration, "encoding") else {
        return Ok(None);
    };
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| malformed(&format!("unsupported encoding {}", label)))?;

    // A declaration readable as ASCII means the bytes are not UTF-16.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok(Some(UTF_8));
    }
    Ok(Some(encoding))
}

fn pseudo_attribute<'a>(declaration: &'a str, name: &str) -> Option<&'a str> {
    let start = declaration.find(name)? + name.len();
    let value = declaration[start..].trim_start().strip_prefix('=')?.trim_start();
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &value[1..];
    value.find(quote).map(|end| &value[..end])
}

fn malformed(message: &str) -> ParseError {
    ParseError::SourceMalformed(message.to_string())
}

fn malformed_at(position: impl std::fmt::Display, err: quick_xml::Error) -> ParseError {
    ParseError::SourceMalformed(format!("{} at byte {}", err, position))
}
