use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Questionnaire::Table)
                    .if_not_exists()
                    .col(pk_auto(Questionnaire::Id))
                    .col(string(Questionnaire::Title))
                    .col(text_null(Questionnaire::Description))
                    .col(json(Questionnaire::Questions))
                    .col(boolean(Questionnaire::Active).default(true))
                    .col(
                        timestamp_with_time_zone(Questionnaire::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Questionnaire::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Questionnaire {
    Table,
    Id,
    Title,
    Description,
    Questions,
    Active,
    CreatedAt,
}
