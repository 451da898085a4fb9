//! Text normalization for outline labels.

/// Collapse whitespace runs into single spaces and trim both ends.
///
/// `None` and empty input both yield an empty string.
pub fn normalize_text(text: Option<&str>) -> String {
    match text {
        Some(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
        None => String::new(),
    }
}
