use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::auth::jwt::JwtConfig;

/// Default offset of the business's local calendar from UTC (IST, +05:30).
pub const DEFAULT_BOOKING_UTC_OFFSET_MINUTES: i32 = 330;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks get to drain after the server stops (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Offset in minutes used to decide which calendar date is "today"
    /// for booking purposes (default: `330`).
    pub booking_utc_offset_minutes: i32,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                    |
    /// |------------------------------|----------------------------|
    /// | `HOST`                       | `0.0.0.0`                  |
    /// | `PORT`                       | `3000`                     |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`      | `10`                       |
    /// | `BOOKING_UTC_OFFSET_MINUTES` | `330`                      |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let booking_utc_offset_minutes: i32 = std::env::var("BOOKING_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| DEFAULT_BOOKING_UTC_OFFSET_MINUTES.to_string())
            .parse()
            .expect("BOOKING_UTC_OFFSET_MINUTES must be a valid i32");
        assert!(
            (-14 * 60..=14 * 60).contains(&booking_utc_offset_minutes),
            "BOOKING_UTC_OFFSET_MINUTES must be within +/-14 hours"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            booking_utc_offset_minutes,
            jwt,
        }
    }

    /// Today's date in the business's local calendar.
    pub fn today(&self) -> NaiveDate {
        local_date(Utc::now(), self.booking_utc_offset_minutes)
    }
}

/// Calendar date of `now` shifted by `offset_minutes`.
pub fn local_date(now: DateTime<Utc>, offset_minutes: i32) -> NaiveDate {
    (now + Duration::minutes(i64::from(offset_minutes))).date_naive()
}
