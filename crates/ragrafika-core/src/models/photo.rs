use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Category applied when the caller does not supply one
pub const DEFAULT_CATEGORY: &str = "general";

/// Prompt sent to the generation API when the caller does not supply one
pub const DEFAULT_STYLE_PROMPT: &str =
    "professional portfolio style, clean, modern, consistent lighting and color grading";

/// One uploaded portfolio photo (`portfolio_photos` row)
///
/// `is_processed` is only ever set together with `styled_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PhotoRecord {
    pub id: i64,
    pub category: String,
    pub original_url: String,
    pub styled_url: Option<String>,
    pub title: String,
    pub description: String,
    pub is_processed: bool,
    pub created_at: DateTime<Utc>,
}

/// Values for a freshly uploaded photo, before stylization
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub category: String,
    pub original_url: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPhotosQuery {
    /// Only return photos of this category
    pub category: Option<String>,
}

impl ListPhotosQuery {
    /// Category filter, treating an empty value as no filter.
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PhotoListResponse {
    pub photos: Vec<PhotoRecord>,
}

/// Upload body. `image` is base64 encoded JPEG data.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreatePhotoRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub style_prompt: Option<String>,
}

impl CreatePhotoRequest {
    /// The encoded image, if present and non-empty.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }

    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn style_prompt(&self) -> &str {
        self.style_prompt
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_STYLE_PROMPT)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePhotoResponse {
    pub id: i64,
    pub original_url: String,
    pub styled_url: Option<String>,
    pub is_processed: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeletePhotoQuery {
    /// Identifier of the photo to delete
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletePhotoResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreatePhotoRequest = serde_json::from_str(r#"{"image": "aGVsbG8="}"#).unwrap();
        assert_eq!(req.image(), Some("aGVsbG8="));
        assert_eq!(req.category(), "general");
        assert_eq!(req.style_prompt(), DEFAULT_STYLE_PROMPT);
        assert!(req.title.is_none());
    }

    #[test]
    fn test_empty_values_fall_back() {
        let req: CreatePhotoRequest =
            serde_json::from_str(r#"{"image": "", "category": "", "style_prompt": " "}"#).unwrap();
        assert!(req.image().is_none());
        assert_eq!(req.category(), "general");
        assert_eq!(req.style_prompt(), DEFAULT_STYLE_PROMPT);
    }

    #[test]
    fn test_empty_category_query_is_no_filter() {
        let query = ListPhotosQuery {
            category: Some(String::new()),
        };
        assert!(query.category_filter().is_none());
    }

    #[test]
    fn test_record_serializes_iso_timestamp() {
        let record = PhotoRecord {
            id: 7,
            category: "weddings".to_string(),
            original_url: "https://cdn.example.com/a.jpg".to_string(),
            styled_url: None,
            title: String::new(),
            description: String::new(),
            is_processed: false,
            created_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["created_at"], "2024-05-01T10:00:00Z");
        assert!(json["styled_url"].is_null());
    }
}
