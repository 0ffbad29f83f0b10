//! Paystack payment gateway client.
//!
//! The storefront opens the Paystack checkout widget client-side, but the
//! client-reported success callback is never trusted: an order only becomes
//! `paid` after this client re-verifies the transaction reference against
//! Paystack's verification endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Result of a server-side verification call.
///
/// `verified` is true only when the gateway itself reports the transaction
/// as successful. A reachable gateway reporting anything else yields
/// `verified = false`; transport failures surface as [`AppError::Upstream`].
#[derive(Debug, Clone)]
pub struct PaymentVerification {
    pub reference: String,
    /// Amount the gateway settled, in kobo
    pub amount: i64,
    pub verified: bool,
}

/// Payment gateway abstraction for dependency injection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Verify a transaction reference against the gateway.
    async fn verify(&self, reference: &str) -> AppResult<PaymentVerification>;
}

/// Verification endpoint response shape
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    status: bool,
    message: Option<String>,
    data: Option<VerifyData>,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    status: String,
    reference: String,
    amount: i64,
}

/// Concrete Paystack client over HTTPS
pub struct PaystackClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl PaystackClient {
    /// Build a client with the configured verification timeout.
    ///
    /// The timeout is the fail-closed bound: on expiry the verification call
    /// errors and the order stays `pending`.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.payment_verify_timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.paystack_base_url.trim_end_matches('/').to_string(),
            secret_key: config.paystack_secret_key().to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    async fn verify(&self, reference: &str) -> AppResult<PaymentVerification> {
        let url = format!("{}/transaction/verify/{}", self.base_url, reference);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::upstream("Payment verification timed out")
                } else {
                    AppError::upstream(format!("Payment provider unreachable: {}", e))
                }
            })?;

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid gateway response: {}", e)))?;

        match body.data {
            Some(data) => {
                let verified = body.status && data.status == "success";
                if !verified {
                    tracing::warn!(
                        reference = %data.reference,
                        gateway_status = %data.status,
                        "Gateway reported non-success for transaction"
                    );
                }
                Ok(PaymentVerification {
                    reference: data.reference,
                    amount: data.amount,
                    verified,
                })
            }
            None => {
                // Unknown reference or gateway-side rejection
                tracing::warn!(
                    reference = %reference,
                    message = body.message.as_deref().unwrap_or("none"),
                    "Gateway returned no transaction data"
                );
                Ok(PaymentVerification {
                    reference: reference.to_string(),
                    amount: 0,
                    verified: false,
                })
            }
        }
    }
}
