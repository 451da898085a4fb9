//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext owning a scratch upload directory and the router
//! - Helpers for uploading decks through the API

pub mod fixtures;

use std::path::{Path, PathBuf};

use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use uuid::Uuid;

use outline_cards_backend::config::Config;
use outline_cards_backend::{router, AppState};

/// Test context with its own upload directory.
///
/// The directory is removed when the context is dropped.
pub struct TestContext {
    pub state: AppState,
    dir: PathBuf,
    app: Router,
}

impl TestContext {
    /// Create a context with no active deck.
    pub async fn new() -> Self {
        Self::build(None).await
    }

    /// Create a context whose default deck has the given content.
    pub async fn with_default_deck(content: &str) -> Self {
        let dir = scratch_dir();
        std::fs::create_dir_all(&dir).expect("Failed to create scratch dir");
        let deck = dir.join("default.opml");
        std::fs::write(&deck, content).expect("Failed to write default deck");
        Self::build_in(dir, Some(deck)).await
    }

    async fn build(default_deck: Option<PathBuf>) -> Self {
        Self::build_in(scratch_dir(), default_deck).await
    }

    async fn build_in(dir: PathBuf, default_deck: Option<PathBuf>) -> Self {
        let config = Config {
            upload_dir: dir.join("uploads"),
            default_deck,
            max_upload_bytes: 64 * 1024,
            ..Config::default()
        };

        let state = AppState::new(config)
            .await
            .expect("Failed to create app state");
        let app = router(state.clone());

        Self { state, dir, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    pub fn upload_dir(&self) -> &Path {
        self.state.library.dir()
    }

    /// Upload a deck through the multipart endpoint.
    pub async fn upload(server: &TestServer, name: &str, content: &str) -> TestResponse {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(content.as_bytes().to_vec())
                .file_name(name)
                .mime_type("text/x-opml"),
        );
        server.post("/api/files").multipart(form).await
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("outline-cards-test-{}", Uuid::new_v4()))
}
