use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatusDto {
    Pending,
    Issued,
    CheckedIn,
    Cancelled,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct TicketDto {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub code: String,
    pub status: TicketStatusDto,
    pub amount_paid_cents: i64,
    pub qr_url: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug, Default)]
pub struct CheckoutRequestDto {
    pub coupon_code: Option<String>,
}

/// Outcome of a ticket checkout.
///
/// Free checkouts issue the ticket immediately; paid ones return a payment page URL.
#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutResponseDto {
    Issued { ticket: TicketDto },
    PaymentRequired { ticket_id: i32, checkout_url: String },
}

#[derive(Serialize, Deserialize, ToSchema, PartialEq, Clone, Debug)]
pub struct CheckInDto {
    #[serde(default)]
    pub code: String,
}
