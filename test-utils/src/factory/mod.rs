//! Factory methods for creating test data.
//!
//! Each entity has a `*Factory` builder for customization and a `create_*` shorthand for
//! default creation. Factories fill required columns with unique, valid defaults so tests
//! only spell out the fields they assert on.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let event = factory::event::EventFactory::new(&db)
//!     .ticketed(2500)
//!     .capacity(10)
//!     .build()
//!     .await?;
//! ```

pub mod channel;
pub mod coach_call;
pub mod coupon;
pub mod event;
pub mod helpers;
pub mod membership;
pub mod personalized_program;
pub mod post;
pub mod program;
pub mod questionnaire;
pub mod ticket;
pub mod user;

pub use helpers::next_id;
