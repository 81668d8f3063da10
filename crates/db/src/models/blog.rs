//! Blog post entity model and DTOs.

use bucketlist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A blog post row from the `blogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// Plain text or markdown body.
    pub content: String,
    pub cover_image_url: Option<String>,
    pub author_id: Option<DbId>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a blog post. `slug` is derived from `title` when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlog {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// DTO for updating a blog post. All fields are optional.
///
/// Flipping `is_published` to `true` stamps `published_at` the first time.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_published: Option<bool>,
}
