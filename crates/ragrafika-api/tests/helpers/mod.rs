//! Test helpers: build AppState and router for integration tests.
//!
//! Photo records live in memory and files in a temp directory, so these tests
//! need neither Postgres nor S3. The generation API is a mockito server.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use ragrafika_api::services::stylization::Stylizer;
use ragrafika_api::setup::routes;
use ragrafika_api::state::AppState;
use ragrafika_core::models::{NewPhoto, PhotoRecord};
use ragrafika_core::{AppError, StylizeSettings};
use ragrafika_db::PhotoStore;
use ragrafika_storage::{LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const STORAGE_BASE_URL: &str = "http://localhost:4000/files";
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// In-memory photo store. Ids increase from 1, every insert is one second newer.
#[derive(Clone, Default)]
pub struct MockPhotoRepository {
    photos: Arc<Mutex<Vec<PhotoRecord>>>,
}

impl MockPhotoRepository {
    pub fn all(&self) -> Vec<PhotoRecord> {
        self.photos.lock().unwrap().clone()
    }

    pub fn get(&self, id: i64) -> Option<PhotoRecord> {
        self.all().into_iter().find(|p| p.id == id)
    }
}

#[async_trait]
impl PhotoStore for MockPhotoRepository {
    async fn list(&self, category: Option<&str>) -> Result<Vec<PhotoRecord>, AppError> {
        let mut photos: Vec<PhotoRecord> = self
            .all()
            .into_iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect();
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(photos)
    }

    async fn insert(&self, photo: NewPhoto) -> Result<PhotoRecord, AppError> {
        let mut photos = self.photos.lock().unwrap();
        let id = photos.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = PhotoRecord {
            id,
            category: photo.category,
            original_url: photo.original_url,
            styled_url: None,
            title: photo.title,
            description: photo.description,
            is_processed: false,
            created_at: base + ChronoDuration::seconds(id),
        };
        photos.push(record.clone());
        Ok(record)
    }

    async fn mark_styled(&self, id: i64, styled_url: &str) -> Result<(), AppError> {
        let mut photos = self.photos.lock().unwrap();
        if let Some(photo) = photos.iter_mut().find(|p| p.id == id) {
            photo.styled_url = Some(styled_url.to_string());
            photo.is_processed = true;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.photos.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every call fails like a closed connection pool
pub struct FailingPhotoStore;

#[async_trait]
impl PhotoStore for FailingPhotoStore {
    async fn list(&self, _category: Option<&str>) -> Result<Vec<PhotoRecord>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn insert(&self, _photo: NewPhoto) -> Result<PhotoRecord, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn mark_styled(&self, _id: i64, _styled_url: &str) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn delete(&self, _id: i64) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }
}

/// Test application: server plus handles on its in-memory state.
pub struct TestApp {
    pub server: TestServer,
    pub photos: MockPhotoRepository,
    pub _temp_dir: TempDir,
    pub storage_path: PathBuf,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Bytes stored for a public URL returned by the API
    pub fn stored_file(&self, url: &str) -> Option<Vec<u8>> {
        let key = url.strip_prefix(&format!("{}/", STORAGE_BASE_URL))?;
        std::fs::read(self.storage_path.join(key)).ok()
    }
}

/// Stylization settings pointing at `base_url`, polling fast.
pub fn stylize_settings(base_url: &str, credentials: bool) -> StylizeSettings {
    StylizeSettings {
        api_key: credentials.then(|| "test-api-key".to_string()),
        folder_id: credentials.then(|| "test-folder".to_string()),
        base_url: base_url.to_string(),
        poll_interval: Duration::from_millis(1),
        max_poll_attempts: 3,
    }
}

/// Settings with no credentials: every upload stays unprocessed.
pub fn unconfigured() -> StylizeSettings {
    stylize_settings("http://127.0.0.1:1", false)
}

async fn build_app(photos: Arc<dyn PhotoStore>, settings: &StylizeSettings) -> (TestServer, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(temp_dir.path().to_path_buf(), STORAGE_BASE_URL.to_string())
            .await
            .expect("Failed to create local storage"),
    );
    let stylizer = Stylizer::new(settings).expect("Failed to build stylizer");

    let state = Arc::new(AppState::new(photos, storage, stylizer));
    let router = routes::setup_routes(state, MAX_BODY_BYTES);
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, temp_dir)
}

/// Setup test app with an in-memory store and local storage.
pub async fn setup_test_app(settings: StylizeSettings) -> TestApp {
    let photos = MockPhotoRepository::default();
    let (server, temp_dir) = build_app(Arc::new(photos.clone()), &settings).await;
    let storage_path = temp_dir.path().to_path_buf();

    TestApp {
        server,
        photos,
        _temp_dir: temp_dir,
        storage_path,
    }
}

/// Test app whose database calls all fail.
pub async fn setup_failing_app() -> (TestServer, TempDir) {
    build_app(Arc::new(FailingPhotoStore), &unconfigured()).await
}
