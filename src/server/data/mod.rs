//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models so the service layer never sees entities. All queries, inserts, updates
//! and deletes go through these repositories.

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
pub mod user;
