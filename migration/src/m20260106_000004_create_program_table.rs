use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Program::Table)
                    .if_not_exists()
                    .col(pk_auto(Program::Id))
                    .col(string(Program::Title))
                    .col(string_uniq(Program::Slug))
                    .col(text(Program::Description))
                    .col(string_null(Program::CoverImageUrl))
                    .col(string_len(Program::MinTier, 16))
                    .col(string_len(Program::Status, 16))
                    .col(
                        timestamp_with_time_zone(Program::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Program::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Program::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Program {
    Table,
    Id,
    Title,
    Slug,
    Description,
    CoverImageUrl,
    MinTier,
    Status,
    CreatedAt,
    UpdatedAt,
}
