//! Application state shared by all handlers.

use crate::services::stylization::Stylizer;
use ragrafika_db::PhotoStore;
use ragrafika_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Photo records (Postgres in production, in-memory in tests)
    pub photos: Arc<dyn PhotoStore>,
    pub storage: Arc<dyn Storage>,
    pub stylizer: Stylizer,
}

impl AppState {
    pub fn new(photos: Arc<dyn PhotoStore>, storage: Arc<dyn Storage>, stylizer: Stylizer) -> Self {
        Self {
            photos,
            storage,
            stylizer,
        }
    }
}
