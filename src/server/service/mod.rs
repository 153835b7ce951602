//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce business
//! rules, coordinate several repositories in one operation and drive the external
//! integrations (Stripe, calendar, email, blob storage, Discord). Services take and
//! return domain models and report failures as `AppError`.
//!
//! Side effects that must not fail the request, such as ticket fulfilment or calendar
//! cleanup, are run best-effort: errors are logged and swallowed.

pub mod admin_code;
pub mod auth;
pub mod channel;
pub mod checkout;
pub mod coach_call;
pub mod coupon;
pub mod event;
pub mod fulfilment;
pub mod maintenance;
pub mod membership;
pub mod personalized_program;
pub mod post;
pub mod program;
pub mod questionnaire;
pub mod ticket;
pub mod upload;
pub mod user;
pub mod webhook;
