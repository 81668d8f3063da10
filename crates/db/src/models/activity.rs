//! Activity entity model and DTOs.

use bucketlist_core::pricing::effective_unit_price;
use bucketlist_core::types::{DbId, MinorAmount, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An activity row from the `activities` table: a priced package of an experience.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub experience_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: MinorAmount,
    pub discounted_price: Option<MinorAmount>,
    pub currency: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Activity {
    /// Per-participant price actually charged.
    pub fn unit_price(&self) -> MinorAmount {
        effective_unit_price(self.price, self.discounted_price)
    }
}

/// DTO for creating an activity. `experience_id` comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub name: String,
    pub description: Option<String>,
    pub price: MinorAmount,
    pub discounted_price: Option<MinorAmount>,
    pub currency: Option<String>,
}

/// DTO for updating an activity. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActivity {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<MinorAmount>,
    pub discounted_price: Option<MinorAmount>,
    pub currency: Option<String>,
    pub is_active: Option<bool>,
}
