//! Memberhub Test Utils
//!
//! Shared testing utilities for the memberhub server. Provides a builder for test contexts
//! backed by in-memory SQLite databases, a lazily created tower-sessions session, and
//! factories that insert entities with sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring the schema of a test database
//! - **TestContext**: Database connection and session for one test
//! - **TestError**: Errors that can occur during test setup
//! - **factory**: Entity factories with builder-style overrides
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn creates_ticket() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_event_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let user = factory::user::create_user(db).await?;
//!     let event = factory::event::create_event(db).await?;
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
