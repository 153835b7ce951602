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
                    .table(PersonalizedProgram::Table)
                    .if_not_exists()
                    .col(pk_auto(PersonalizedProgram::Id))
                    .col(integer(PersonalizedProgram::UserId))
                    .col(string(PersonalizedProgram::Title))
                    .col(text_null(PersonalizedProgram::Notes))
                    .col(date(PersonalizedProgram::StartDate))
                    .col(date(PersonalizedProgram::EndDate))
                    .col(integer(PersonalizedProgram::TrainingDays))
                    .col(json(PersonalizedProgram::DailyTasks))
                    .col(string_len(PersonalizedProgram::Status, 16))
                    .col(
                        timestamp_with_time_zone(PersonalizedProgram::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(PersonalizedProgram::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personalized_program_user_id")
                            .from(PersonalizedProgram::Table, PersonalizedProgram::UserId)
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
            .drop_table(Table::drop().table(PersonalizedProgram::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PersonalizedProgram {
    Table,
    Id,
    UserId,
    Title,
    Notes,
    StartDate,
    EndDate,
    TrainingDays,
    DailyTasks,
    Status,
    CreatedAt,
    UpdatedAt,
}
