//! Card endpoints

use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, Json};
use rand::seq::SliceRandom;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/cards
pub async fn list(State(state): State<AppState>) -> Result<Json<CardListResponse>> {
    let (deck, cards) = active_cards(&state).await?;
    Ok(Json(CardListResponse {
        deck,
        cards: cards.as_ref().clone(),
    }))
}

/// GET /api/cards/topics
pub async fn topics(State(state): State<AppState>) -> Result<Json<TopicListResponse>> {
    let (deck, cards) = active_cards(&state).await?;
    Ok(Json(TopicListResponse {
        deck,
        topics: outline_core::group_by_topic(&cards),
    }))
}

/// GET /api/cards/random
pub async fn random(State(state): State<AppState>) -> Result<Json<Card>> {
    let (_, cards) = active_cards(&state).await?;
    let card = cards
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(ApiError::NoCards)?;
    Ok(Json(card))
}

/// Name and cards of the active deck; no deck means no cards.
async fn active_cards(state: &AppState) -> Result<(Option<String>, Arc<Vec<Card>>)> {
    let Some(path) = state.active.read().await.clone() else {
        return Ok((None, Arc::default()));
    };

    let name = deck_name(&path);
    let cache = state.cache.clone();
    let cards = tokio::task::spawn_blocking(move || cache.load(&path))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok((Some(name), cards))
}

pub(crate) fn deck_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
