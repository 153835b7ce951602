//! HTTP request handlers.
//!
//! Controllers check access with `AuthGuard`, convert request DTOs into operation
//! parameters, call the service layer and convert the resulting domain models back into
//! response DTOs.

pub mod auth;
pub mod channel;
pub mod coach_call;
pub mod coupon;
pub mod event;
pub mod extract;
pub mod membership;
pub mod param;
pub mod personalized_program;
pub mod post;
pub mod program;
pub mod questionnaire;
pub mod ticket;
pub mod upload;
pub mod user;
pub mod webhook;
