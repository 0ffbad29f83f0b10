//! Blog post entity and slug handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Featured media kind for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl From<&str> for MediaType {
    fn from(s: &str) -> Self {
        match s {
            "video" => MediaType::Video,
            _ => MediaType::Image,
        }
    }
}

/// Blog post entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_media_url: String,
    pub media_type: MediaType,
    pub author_id: Uuid,
    /// Author display name, resolved at read time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derive a URL slug from a post title
pub fn slug_for_title(title: &str) -> String {
    slug::slugify(title)
}

/// Blog post creation payload (admin; author is the current user)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPost {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(
        min = 1,
        max = 250,
        message = "Excerpt is required and limited to 250 characters"
    ))]
    pub excerpt: String,
    #[validate(length(min = 1, message = "Featured media is required"))]
    pub featured_media_url: String,
    pub media_type: MediaType,
}

/// Blog post update payload (admin); a new title re-derives the slug
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPost {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub content: Option<String>,
    #[validate(length(max = 250, message = "Excerpt is limited to 250 characters"))]
    pub excerpt: Option<String>,
    pub featured_media_url: Option<String>,
    pub media_type: Option<MediaType>,
}
