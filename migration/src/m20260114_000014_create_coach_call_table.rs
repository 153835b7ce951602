use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoachCall::Table)
                    .if_not_exists()
                    .col(pk_auto(CoachCall::Id))
                    .col(integer(CoachCall::UserId))
                    .col(timestamp_with_time_zone(CoachCall::StartsAt))
                    .col(timestamp_with_time_zone(CoachCall::EndsAt))
                    .col(string_len(CoachCall::Status, 16))
                    .col(string_null(CoachCall::Topic))
                    .col(string_null(CoachCall::CalendarEventId))
                    .col(string_null(CoachCall::MeetingUrl))
                    .col(
                        timestamp_with_time_zone(CoachCall::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coach_call_user_id")
                            .from(CoachCall::Table, CoachCall::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CoachCall::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CoachCall {
    Table,
    Id,
    UserId,
    StartsAt,
    EndsAt,
    Status,
    Topic,
    CalendarEventId,
    MeetingUrl,
    CreatedAt,
}
