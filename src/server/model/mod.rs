//! Domain models and operation parameter types.
//!
//! Repositories convert SeaORM entities into these models at the data boundary and
//! controllers convert them into wire DTOs.

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

/// Page request shared by paginated listings.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
}

impl PageParams {
    /// Total pages for `total` items, at least zero.
    pub fn total_pages(&self, total: u64) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        (total as f64 / self.per_page as f64).ceil() as u64
    }
}
