use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    model::api::ErrorDto,
    server::{error::AppError, service::webhook::WebhookService, state::AppState},
};

/// Tag for grouping webhook endpoints in OpenAPI documentation
pub static WEBHOOK_TAG: &str = "webhook";

const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Receive a Stripe webhook delivery.
///
/// The raw body is verified against the `Stripe-Signature` header before it is parsed.
/// Completed checkouts issue tickets or activate memberships, expired checkouts release
/// them, and paid invoices renew subscriptions. Other event types are acknowledged.
///
/// # Access Control
/// - Public, authenticated by the webhook signature
///
/// # Returns
/// - `200 OK` - Delivery applied or ignored
/// - `400 Bad Request` - Missing or invalid signature, or unreadable payload
/// - `500 Internal Server Error` - Database error, so Stripe retries the delivery
#[utoipa::path(
    post,
    path = "/api/webhooks/stripe",
    tag = WEBHOOK_TAG,
    request_body(content = String, description = "Raw Stripe event payload"),
    responses(
        (status = 200, description = "Delivery acknowledged"),
        (status = 400, description = "Missing or invalid signature, or unreadable payload", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    WebhookService::new(&state.db, &state.integrations, &state.app_url)
        .handle(&body, signature, Utc::now())
        .await?;

    Ok(StatusCode::OK)
}
