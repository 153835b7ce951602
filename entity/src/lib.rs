//! SeaORM entities for the membership platform schema.

pub mod prelude;

pub mod channel;
pub mod checklist_item;
pub mod coach_call;
pub mod coupon;
pub mod event;
pub mod event_rsvp;
pub mod membership;
pub mod membership_tier;
pub mod personalized_program;
pub mod post;
pub mod program;
pub mod questionnaire;
pub mod questionnaire_response;
pub mod sea_orm_active_enums;
pub mod ticket;
pub mod user;
pub mod video;
