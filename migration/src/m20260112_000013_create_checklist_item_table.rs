use sea_orm_migration::{prelude::*, schema::*};

use super::m20260112_000012_create_personalized_program_table::PersonalizedProgram;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChecklistItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ChecklistItem::Id))
                    .col(integer(ChecklistItem::PersonalizedProgramId))
                    .col(date(ChecklistItem::Date))
                    .col(string(ChecklistItem::Title))
                    .col(integer(ChecklistItem::Position).default(0))
                    .col(timestamp_with_time_zone_null(ChecklistItem::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checklist_item_personalized_program_id")
                            .from(ChecklistItem::Table, ChecklistItem::PersonalizedProgramId)
                            .to(PersonalizedProgram::Table, PersonalizedProgram::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_checklist_item_program_date_position")
                    .table(ChecklistItem::Table)
                    .col(ChecklistItem::PersonalizedProgramId)
                    .col(ChecklistItem::Date)
                    .col(ChecklistItem::Position)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChecklistItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChecklistItem {
    Table,
    Id,
    PersonalizedProgramId,
    Date,
    Title,
    Position,
    CompletedAt,
}
