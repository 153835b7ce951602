use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string(Event::Title))
                    .col(string_uniq(Event::Slug))
                    .col(text(Event::Description))
                    .col(string_null(Event::Location))
                    .col(timestamp_with_time_zone(Event::StartsAt))
                    .col(timestamp_with_time_zone(Event::EndsAt))
                    .col(integer(Event::Capacity).default(0))
                    .col(string_len(Event::MinTier, 16))
                    .col(boolean(Event::Ticketed).default(false))
                    .col(big_integer(Event::TicketPriceCents).default(0))
                    .col(string_len(Event::Status, 16))
                    .col(
                        timestamp_with_time_zone(Event::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Event::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Title,
    Slug,
    Description,
    Location,
    StartsAt,
    EndsAt,
    Capacity,
    MinTier,
    Ticketed,
    TicketPriceCents,
    Status,
    CreatedAt,
    UpdatedAt,
}
