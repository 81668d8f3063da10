use std::sync::Arc;

use crate::config::ServerConfig;
use crate::payments::PaymentGateway;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bucketlist_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event bus for booking lifecycle events.
    pub event_bus: Arc<bucketlist_events::EventBus>,
    /// Payment gateway used by the online checkout.
    pub payments: Arc<dyn PaymentGateway>,
}
