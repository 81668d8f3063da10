/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts in minor currency units (paise for INR).
pub type MinorAmount = i64;

/// Currency used when an entity does not specify one.
pub const DEFAULT_CURRENCY: &str = "INR";
