use ragrafika_core::{
    models::{NewPhoto, PhotoRecord},
    AppError,
};
use sqlx::{PgPool, Postgres};

const PHOTO_COLUMNS: &str =
    "id, category, original_url, styled_url, title, description, is_processed, created_at";

/// Photo persistence used by the portfolio handlers
#[async_trait::async_trait]
pub trait PhotoStore: Send + Sync {
    /// All photos, or only those in `category`, newest first
    async fn list(&self, category: Option<&str>) -> Result<Vec<PhotoRecord>, AppError>;

    /// Insert an unprocessed photo and return the stored row
    async fn insert(&self, photo: NewPhoto) -> Result<PhotoRecord, AppError>;

    /// Record the stylization result. Sets `styled_url` and `is_processed` together.
    async fn mark_styled(&self, id: i64, styled_url: &str) -> Result<(), AppError>;

    /// Delete by id. Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Connectivity check used by the health endpoints
    async fn ping(&self) -> Result<(), AppError>;
}

/// Repository for the `portfolio_photos` table
#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PhotoStore for PhotoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "portfolio_photos", db.operation = "select"))]
    async fn list(&self, category: Option<&str>) -> Result<Vec<PhotoRecord>, AppError> {
        let photos = match category {
            Some(category) => {
                sqlx::query_as::<Postgres, PhotoRecord>(&format!(
                    "SELECT {} FROM portfolio_photos WHERE category = $1 ORDER BY created_at DESC, id DESC",
                    PHOTO_COLUMNS
                ))
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<Postgres, PhotoRecord>(&format!(
                    "SELECT {} FROM portfolio_photos ORDER BY created_at DESC, id DESC",
                    PHOTO_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        tracing::debug!(count = photos.len(), "Listed portfolio photos");

        Ok(photos)
    }

    #[tracing::instrument(skip(self, photo), fields(db.table = "portfolio_photos", db.operation = "insert", category = %photo.category))]
    async fn insert(&self, photo: NewPhoto) -> Result<PhotoRecord, AppError> {
        let record = sqlx::query_as::<Postgres, PhotoRecord>(&format!(
            r#"
            INSERT INTO portfolio_photos (category, original_url, title, description, is_processed)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        ))
        .bind(&photo.category)
        .bind(&photo.original_url)
        .bind(&photo.title)
        .bind(&photo.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "portfolio_photos", db.operation = "update", db.record_id = %id))]
    async fn mark_styled(&self, id: i64, styled_url: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE portfolio_photos SET styled_url = $1, is_processed = TRUE WHERE id = $2",
        )
        .bind(styled_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(photo_id = id, "Photo disappeared before stylization write-back");
        }

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "portfolio_photos", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM portfolio_photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(rows_affected = result.rows_affected(), "Deleted portfolio photo");

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<Postgres, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
