//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod blog_repo;
pub mod booking_repo;
pub mod coupon_repo;
pub mod destination_repo;
pub mod experience_repo;
pub mod role_repo;
pub mod session_repo;
pub mod time_slot_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use blog_repo::BlogRepo;
pub use booking_repo::BookingRepo;
pub use coupon_repo::CouponRepo;
pub use destination_repo::DestinationRepo;
pub use experience_repo::ExperienceRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use time_slot_repo::TimeSlotRepo;
pub use user_repo::UserRepo;
