//! Deck file endpoints

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::cards::deck_name;
use crate::services::library::Library;
use crate::AppState;

/// Multipart field carrying the uploaded outline.
const UPLOAD_FIELD: &str = "file";

/// GET /api/files
pub async fn list(State(state): State<AppState>) -> Result<Json<FileListResponse>> {
    let active = state.active.read().await.clone();
    let entries = state.library.list().await?;

    let files = entries
        .into_iter()
        .map(|entry| {
            let is_active = active.as_deref() == Some(entry.path.as_path());
            DeckFile::from_entry(entry, is_active)
        })
        .collect();

    Ok(Json(FileListResponse {
        active: active.as_deref().map(deck_name),
        files,
    }))
}

/// POST /api/files
/// Upload an outline, store it and make it the active deck
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| ApiError::BadRequest("Upload is missing a file name".to_string()))?;
        let content = field.bytes().await?;
        upload = Some((name, content));
        break;
    }

    let (name, content) = upload
        .ok_or_else(|| ApiError::BadRequest(format!("Missing '{}' field", UPLOAD_FIELD)))?;

    Library::validate_name(&name)?;

    // Reject malformed documents before they reach the library
    let cards = outline_core::try_parse_bytes(&content)?;
    if cards.is_empty() {
        tracing::warn!("Uploaded deck {} contains no cards", name);
    }

    let path = state.library.save(&name, &content).await?;
    state.cache.invalidate(&path);
    *state.active.write().await = Some(path);

    let entry = state.library.entry(&name).await?;
    tracing::info!("Activated uploaded deck {} ({} cards)", name, cards.len());

    Ok(Json(UploadResponse {
        file: DeckFile::from_entry(entry, true),
        card_count: cards.len(),
    }))
}

/// PUT /api/files/active
/// Select a stored deck as the active deck
pub async fn select(
    State(state): State<AppState>,
    Json(request): Json<SelectDeckRequest>,
) -> Result<Json<DeckFile>> {
    let path = state.library.resolve(&request.name).await?;
    let entry = state.library.entry(&request.name).await?;

    *state.active.write().await = Some(path);
    tracing::info!("Activated deck {}", request.name);

    Ok(Json(DeckFile::from_entry(entry, true)))
}

/// DELETE /api/files/active
/// Drop the current selection and fall back to the configured default deck
pub async fn reset(State(state): State<AppState>) -> Result<Json<ActiveDeckResponse>> {
    let default_deck = state.config.default_deck.clone();
    let active = default_deck.as_deref().map(deck_name);

    *state.active.write().await = default_deck;
    tracing::info!("Reset active deck to {}", active.as_deref().unwrap_or("none"));

    Ok(Json(ActiveDeckResponse { active }))
}

/// DELETE /api/files/:name
/// Delete a stored deck; deleting the active deck falls back to the default
pub async fn remove(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ActiveDeckResponse>> {
    let path = state.library.path_for(&name)?;
    state.cache.invalidate(&path);
    state.library.remove(&name).await?;

    let mut active = state.active.write().await;
    if active.as_deref() == Some(path.as_path()) {
        *active = state.config.default_deck.clone();
    }

    Ok(Json(ActiveDeckResponse {
        active: active.as_deref().map(deck_name),
    }))
}
