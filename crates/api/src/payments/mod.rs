//! Payment gateway integration.
//!
//! Checkout talks to the gateway through the [`PaymentGateway`] trait so
//! the HTTP layer never depends on a concrete provider. Production wires in
//! [`razorpay::RazorpayGateway`]; integration tests substitute a fake.

pub mod razorpay;

use async_trait::async_trait;
use bucketlist_core::types::MinorAmount;
use serde::{Deserialize, Serialize};

/// Default base URL of the Razorpay REST API.
pub const DEFAULT_RAZORPAY_BASE_URL: &str = "https://api.razorpay.com";

/// Gateway credentials loaded from the environment.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Public key id, also handed to the checkout widget.
    pub key_id: String,
    /// Secret used for basic auth and signature verification.
    pub key_secret: String,
    /// Base URL of the gateway REST API.
    pub base_url: String,
}

impl PaymentConfig {
    /// Load gateway configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                     |
    /// |-----------------------|----------|-----------------------------|
    /// | `RAZORPAY_KEY_ID`     | **yes**  | --                          |
    /// | `RAZORPAY_KEY_SECRET` | **yes**  | --                          |
    /// | `RAZORPAY_BASE_URL`   | no       | `https://api.razorpay.com`  |
    ///
    /// # Panics
    ///
    /// Panics if either key is missing or empty.
    pub fn from_env() -> Self {
        let key_id = std::env::var("RAZORPAY_KEY_ID").expect("RAZORPAY_KEY_ID must be set");
        let key_secret =
            std::env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET must be set");
        assert!(
            !key_id.is_empty() && !key_secret.is_empty(),
            "Razorpay credentials must not be empty"
        );
        let base_url = std::env::var("RAZORPAY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_RAZORPAY_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        Self {
            key_id,
            key_secret,
            base_url,
        }
    }
}

/// Errors from the payment gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("Gateway API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// An order as known to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-assigned order id (`order_...`).
    pub id: String,
    /// Amount in minor units.
    pub amount: MinorAmount,
    pub currency: String,
    /// Merchant reference sent at creation time.
    #[serde(default)]
    pub receipt: Option<String>,
    /// `created`, `attempted` or `paid`.
    pub status: String,
}

/// Operations checkout needs from a payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key id the client passes to the checkout widget.
    fn key_id(&self) -> &str;

    /// Create an order for `amount` minor units.
    async fn create_order(
        &self,
        amount: MinorAmount,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError>;

    /// Fetch an existing order.
    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentError>;

    /// Check the signature the checkout widget returned for a payment.
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}
