//! Destination entity model and DTOs.

use bucketlist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A destination row from the `destinations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Destination {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub country: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a destination. `slug` is derived from `name` when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDestination {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub country: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating a destination. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDestination {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub country: Option<String>,
    pub image_url: Option<String>,
}
