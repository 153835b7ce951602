//! Stripe Checkout sessions and webhook signature verification.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

use crate::server::{
    config::StripeConfig, error::integration::IntegrationError, integration::ensure_success,
};

const SERVICE: &str = "stripe";

/// Maximum age of a webhook signature timestamp in seconds.
pub const WEBHOOK_TOLERANCE_SECONDS: i64 = 300;

/// Smallest amount Stripe will charge in USD, in cents.
pub const MIN_CHARGE_CENTS: i64 = 50;

#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    webhook_secret: Option<String>,
    api_url: String,
}

/// One-off payment for a single line item.
pub struct PaymentCheckout {
    pub product_name: String,
    pub amount_cents: i64,
    pub customer_email: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: Vec<(&'static str, String)>,
}

/// Recurring subscription for an existing Stripe price.
pub struct SubscriptionCheckout {
    pub price_id: String,
    pub customer_email: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: Vec<(&'static str, String)>,
}

#[derive(Debug)]
pub struct CheckoutSession {
    pub id: String,
    /// Stripe-hosted page the customer is sent to.
    pub url: String,
}

#[derive(Deserialize)]
struct CheckoutSessionResponse {
    id: String,
    url: Option<String>,
}

/// Envelope of a webhook delivery.
#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

/// Fields of a checkout session object used by webhook handling.
#[derive(Debug, Deserialize)]
pub struct CheckoutSessionObject {
    pub id: String,
    pub amount_total: Option<i64>,
    /// Set on `subscription` mode sessions.
    pub subscription: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Fields of an invoice object used by subscription renewals.
///
/// Older API versions put the subscription id at the top level, newer ones under
/// `parent.subscription_details`.
#[derive(Debug, Deserialize)]
pub struct InvoiceObject {
    pub id: String,
    pub billing_reason: Option<String>,
    subscription: Option<String>,
    parent: Option<InvoiceParent>,
    #[serde(default)]
    lines: InvoiceLines,
}

#[derive(Debug, Deserialize)]
struct InvoiceParent {
    subscription_details: Option<SubscriptionDetails>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionDetails {
    subscription: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct InvoiceLines {
    #[serde(default)]
    data: Vec<InvoiceLine>,
}

#[derive(Debug, Deserialize)]
struct InvoiceLine {
    period: Option<InvoicePeriod>,
}

#[derive(Debug, Deserialize)]
struct InvoicePeriod {
    end: i64,
}

impl InvoiceObject {
    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription.as_deref().or_else(|| {
            self.parent
                .as_ref()
                .and_then(|parent| parent.subscription_details.as_ref())
                .and_then(|details| details.subscription.as_deref())
        })
    }

    /// The invoice opening a subscription, already covered by checkout completion.
    pub fn is_subscription_start(&self) -> bool {
        self.billing_reason.as_deref() == Some("subscription_create")
    }

    /// End of the latest billing period the invoice pays for.
    pub fn paid_through(&self) -> Option<DateTime<Utc>> {
        self.lines
            .data
            .iter()
            .filter_map(|line| line.period.as_ref())
            .map(|period| period.end)
            .max()
            .and_then(|end| DateTime::from_timestamp(end, 0))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Stripe-Signature header is malformed")]
    Malformed,
    #[error("Stripe-Signature timestamp outside tolerance")]
    Expired,
    #[error("Stripe-Signature does not match payload")]
    Mismatch,
}

impl StripeClient {
    pub fn new(http: reqwest::Client, config: &StripeConfig) -> Self {
        Self {
            http,
            secret_key: config.secret_key.clone(),
            webhook_secret: config.webhook_secret.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }

    /// Creates a `payment` mode checkout session with inline price data.
    pub async fn create_payment_session(
        &self,
        checkout: PaymentCheckout,
    ) -> Result<CheckoutSession, IntegrationError> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("success_url".into(), checkout.success_url),
            ("cancel_url".into(), checkout.cancel_url),
            ("line_items[0][quantity]".into(), "1".into()),
            ("line_items[0][price_data][currency]".into(), "usd".into()),
            (
                "line_items[0][price_data][unit_amount]".into(),
                checkout.amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                checkout.product_name,
            ),
        ];
        push_common(&mut form, checkout.customer_email, checkout.metadata);

        self.create_session(form).await
    }

    /// Creates a `subscription` mode checkout session for a recurring price.
    pub async fn create_subscription_session(
        &self,
        checkout: SubscriptionCheckout,
    ) -> Result<CheckoutSession, IntegrationError> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "subscription".into()),
            ("success_url".into(), checkout.success_url),
            ("cancel_url".into(), checkout.cancel_url),
            ("line_items[0][quantity]".into(), "1".into()),
            ("line_items[0][price]".into(), checkout.price_id),
        ];
        push_common(&mut form, checkout.customer_email, checkout.metadata);

        self.create_session(form).await
    }

    async fn create_session(
        &self,
        form: Vec<(String, String)>,
    ) -> Result<CheckoutSession, IntegrationError> {
        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_url))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        let session = ensure_success(SERVICE, response)
            .await?
            .json::<CheckoutSessionResponse>()
            .await
            .map_err(IntegrationError::http(SERVICE))?;

        let Some(url) = session.url else {
            return Err(IntegrationError::InvalidResponse {
                service: SERVICE,
                reason: format!("checkout session {} has no url", session.id),
            });
        };

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}

fn push_common(
    form: &mut Vec<(String, String)>,
    customer_email: Option<String>,
    metadata: Vec<(&'static str, String)>,
) {
    if let Some(email) = customer_email {
        form.push(("customer_email".into(), email));
    }
    for (key, value) in metadata {
        form.push((format!("metadata[{}]", key), value));
    }
}

/// Verifies a `Stripe-Signature` header against the raw request body.
///
/// The header carries `t=<unix seconds>` and one or more `v1=<hex hmac>` entries. The
/// expected signature is HMAC-SHA256 over `"{t}.{body}"` keyed with the endpoint secret.
///
/// # Arguments
/// - `payload` - Raw request body exactly as received
/// - `header` - Value of the `Stripe-Signature` header
/// - `secret` - Webhook signing secret
/// - `now` - Current unix time in seconds
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<&str> = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse().map_err(|_| SignatureError::Malformed)?)
            }
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let Some(timestamp) = timestamp else {
        return Err(SignatureError::Malformed);
    };
    if signatures.is_empty() {
        return Err(SignatureError::Malformed);
    }
    if (now - timestamp).abs() > WEBHOOK_TOLERANCE_SECONDS {
        return Err(SignatureError::Expired);
    }

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::Mismatch)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures.iter().any(|signature| match hex::decode(signature) {
        Ok(bytes) => mac.clone().verify_slice(&bytes).is_ok(),
        Err(_) => false,
    });

    if matched {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Computes a `Stripe-Signature` header value, used by tests to sign payloads.
#[cfg(test)]
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(mac.finalize().into_bytes())
    )
}
