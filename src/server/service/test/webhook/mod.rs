use super::{with_stripe, APP_URL, WEBHOOK_SECRET};
use crate::server::{
    data::{coupon::CouponRepository, membership::MembershipRepository, ticket::TicketRepository},
    error::AppError,
    integration::{stripe::sign_payload, Integrations},
    service::webhook::WebhookService,
};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{MembershipStatus, TicketStatus, TierLevel};
use test_utils::{builder::TestBuilder, factory};

mod membership;
mod signature;

/// Stripe is never called while handling webhooks.
const UNUSED_STRIPE_URL: &str = "http://127.0.0.1:9";

fn session_event(kind: &str, session_id: &str, metadata: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "id": "evt_test",
        "type": kind,
        "data": {
            "object": {
                "id": session_id,
                "amount_total": 2500,
                "metadata": metadata
            }
        }
    }))
    .unwrap()
}

fn invoice_event(subscription_id: &str, billing_reason: &str, period_end: Option<i64>) -> Vec<u8> {
    let lines: Vec<serde_json::Value> = period_end
        .map(|end| serde_json::json!({ "period": { "start": end - 30 * 86_400, "end": end } }))
        .into_iter()
        .collect();

    serde_json::to_vec(&serde_json::json!({
        "id": "evt_invoice",
        "type": "invoice.paid",
        "data": {
            "object": {
                "id": "in_test",
                "billing_reason": billing_reason,
                "subscription": subscription_id,
                "lines": { "data": lines }
            }
        }
    }))
    .unwrap()
}
