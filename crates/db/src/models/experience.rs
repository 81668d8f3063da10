//! Experience entity model and DTOs.

use bucketlist_core::types::{DbId, MinorAmount, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An experience row from the `experiences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Experience {
    pub id: DbId,
    pub destination_id: Option<DbId>,
    pub vendor_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    /// "Starting from" price in minor units.
    pub price: MinorAmount,
    pub currency: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an experience. `vendor_id` is set from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExperience {
    pub destination_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub price: MinorAmount,
    pub currency: Option<String>,
}

/// DTO for updating an experience. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExperience {
    pub destination_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<MinorAmount>,
    pub currency: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /experiences`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceListQuery {
    pub destination_id: Option<DbId>,
    pub category: Option<String>,
    /// Case-insensitive match against title and location.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
