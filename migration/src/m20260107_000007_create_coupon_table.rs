use sea_orm_migration::{prelude::*, schema::*};

use super::m20260106_000005_create_event_table::Event;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coupon::Table)
                    .if_not_exists()
                    .col(pk_auto(Coupon::Id))
                    .col(string_uniq(Coupon::Code))
                    .col(integer_null(Coupon::PercentOff))
                    .col(big_integer_null(Coupon::AmountOffCents))
                    .col(integer_null(Coupon::MaxRedemptions))
                    .col(integer(Coupon::RedemptionCount).default(0))
                    .col(timestamp_with_time_zone_null(Coupon::ExpiresAt))
                    .col(integer_null(Coupon::EventId))
                    .col(boolean(Coupon::Active).default(true))
                    .col(
                        timestamp_with_time_zone(Coupon::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupon_event_id")
                            .from(Coupon::Table, Coupon::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Coupon::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Coupon {
    Table,
    Id,
    Code,
    PercentOff,
    AmountOffCents,
    MaxRedemptions,
    RedemptionCount,
    ExpiresAt,
    EventId,
    Active,
    CreatedAt,
}
