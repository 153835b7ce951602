use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are generated from SeaORM entities using the SQLite backend and created in the
/// order they were added, so tables with foreign keys must come after the tables they
/// reference.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Program)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user, membership tier and membership tables.
    ///
    /// Every other table group builds on these, so only one group method should be
    /// used per builder.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User)
            .with_table(MembershipTier)
            .with_table(Membership)
    }

    /// Adds the user tables plus events, RSVPs, coupons and tickets.
    pub fn with_event_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Event)
            .with_table(EventRsvp)
            .with_table(Coupon)
            .with_table(Ticket)
    }

    /// Adds the user tables plus programs, posts, channels and videos.
    pub fn with_content_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Program)
            .with_table(Post)
            .with_table(Channel)
            .with_table(Video)
    }

    /// Adds the user tables plus personalized programs, checklists, coach calls and
    /// questionnaires.
    pub fn with_coaching_tables(self) -> Self {
        self.with_user_tables()
            .with_table(PersonalizedProgram)
            .with_table(ChecklistItem)
            .with_table(CoachCall)
            .with_table(Questionnaire)
            .with_table(QuestionnaireResponse)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Event)
            .with_table(EventRsvp)
            .with_table(Coupon)
            .with_table(Ticket)
            .with_table(Program)
            .with_table(Post)
            .with_table(Channel)
            .with_table(Video)
            .with_table(PersonalizedProgram)
            .with_table(ChecklistItem)
            .with_table(CoachCall)
            .with_table(Questionnaire)
            .with_table(QuestionnaireResponse)
    }

    /// Builds the test context and creates all configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
