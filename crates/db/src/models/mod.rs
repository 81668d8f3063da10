//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod activity;
pub mod blog;
pub mod booking;
pub mod coupon;
pub mod destination;
pub mod experience;
pub mod role;
pub mod session;
pub mod time_slot;
pub mod user;
