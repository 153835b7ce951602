//! Wire DTOs shared with web and mobile clients.

pub mod api;
pub mod channel;
pub mod coach_call;
pub mod coupon;
pub mod event;
pub mod membership;
pub mod personalized_program;
pub mod post;
pub mod program;
pub mod questionnaire;
pub mod ticket;
pub mod upload;
pub mod user;
