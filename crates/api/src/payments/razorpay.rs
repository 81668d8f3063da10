//! REST client for the Razorpay Orders API.
//!
//! Wraps order creation and lookup using [`reqwest`] with HTTP basic auth.
//! Checkout signatures are verified locally with the key secret.

use async_trait::async_trait;
use bucketlist_core::payment_signature::verify_checkout_signature;
use bucketlist_core::types::MinorAmount;
use serde::de::DeserializeOwned;

use super::{GatewayOrder, PaymentConfig, PaymentError, PaymentGateway};

/// HTTP client for the Razorpay API.
pub struct RazorpayGateway {
    client: reqwest::Client,
    config: PaymentConfig,
}

impl RazorpayGateway {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: PaymentConfig) -> Self {
        Self { client, config }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or return a
    /// [`PaymentError::ApiError`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PaymentError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PaymentError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> &str {
        &self.config.key_id
    }

    /// Sends `POST /v1/orders`.
    async fn create_order(
        &self,
        amount: MinorAmount,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "receipt": receipt,
        });

        let response = self
            .client
            .post(format!("{}/v1/orders", self.config.base_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await?;

        let order: GatewayOrder = Self::parse_response(response).await?;
        tracing::info!(order_id = %order.id, amount, receipt, "Payment order created");
        Ok(order)
    }

    /// Sends `GET /v1/orders/{order_id}`.
    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentError> {
        let response = self
            .client
            .get(format!("{}/v1/orders/{}", self.config.base_url, order_id))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_checkout_signature(&self.config.key_secret, order_id, payment_id, signature)
    }
}
