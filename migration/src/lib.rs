pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_membership_tier_table;
mod m20260105_000003_create_membership_table;
mod m20260106_000004_create_program_table;
mod m20260106_000005_create_event_table;
mod m20260106_000006_create_event_rsvp_table;
mod m20260107_000007_create_coupon_table;
mod m20260107_000008_create_ticket_table;
mod m20260108_000009_create_post_table;
mod m20260108_000010_create_channel_table;
mod m20260108_000011_create_video_table;
mod m20260112_000012_create_personalized_program_table;
mod m20260112_000013_create_checklist_item_table;
mod m20260114_000014_create_coach_call_table;
mod m20260115_000015_create_questionnaire_table;
mod m20260115_000016_create_questionnaire_response_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_membership_tier_table::Migration),
            Box::new(m20260105_000003_create_membership_table::Migration),
            Box::new(m20260106_000004_create_program_table::Migration),
            Box::new(m20260106_000005_create_event_table::Migration),
            Box::new(m20260106_000006_create_event_rsvp_table::Migration),
            Box::new(m20260107_000007_create_coupon_table::Migration),
            Box::new(m20260107_000008_create_ticket_table::Migration),
            Box::new(m20260108_000009_create_post_table::Migration),
            Box::new(m20260108_000010_create_channel_table::Migration),
            Box::new(m20260108_000011_create_video_table::Migration),
            Box::new(m20260112_000012_create_personalized_program_table::Migration),
            Box::new(m20260112_000013_create_checklist_item_table::Migration),
            Box::new(m20260114_000014_create_coach_call_table::Migration),
            Box::new(m20260115_000015_create_questionnaire_table::Migration),
            Box::new(m20260115_000016_create_questionnaire_response_table::Migration),
        ]
    }
}
