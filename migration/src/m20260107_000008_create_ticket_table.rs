use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260106_000005_create_event_table::Event,
    m20260107_000007_create_coupon_table::Coupon,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(integer(Ticket::EventId))
                    .col(integer(Ticket::UserId))
                    .col(string_uniq(Ticket::Code))
                    .col(string_len(Ticket::Status, 16))
                    .col(big_integer(Ticket::AmountPaidCents).default(0))
                    .col(integer_null(Ticket::CouponId))
                    .col(string_null(Ticket::StripeSessionId))
                    .col(string_null(Ticket::QrUrl))
                    .col(timestamp_with_time_zone_null(Ticket::CheckedInAt))
                    .col(
                        timestamp_with_time_zone(Ticket::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_event_id")
                            .from(Ticket::Table, Ticket::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_user_id")
                            .from(Ticket::Table, Ticket::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_coupon_id")
                            .from(Ticket::Table, Ticket::CouponId)
                            .to(Coupon::Table, Coupon::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_stripe_session_id")
                    .table(Ticket::Table)
                    .col(Ticket::StripeSessionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    EventId,
    UserId,
    Code,
    Status,
    AmountPaidCents,
    CouponId,
    StripeSessionId,
    QrUrl,
    CheckedInAt,
    CreatedAt,
}
