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
                    .table(Membership::Table)
                    .if_not_exists()
                    .col(pk_auto(Membership::Id))
                    .col(integer(Membership::UserId))
                    .col(string_len(Membership::Tier, 16))
                    .col(string_len(Membership::Status, 16))
                    .col(timestamp_with_time_zone_null(Membership::StartedAt))
                    .col(timestamp_with_time_zone_null(Membership::ExpiresAt))
                    .col(string_null(Membership::StripeSessionId))
                    .col(string_null(Membership::StripeSubscriptionId))
                    .col(
                        timestamp_with_time_zone(Membership::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_membership_user_id")
                            .from(Membership::Table, Membership::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_membership_user_status")
                    .table(Membership::Table)
                    .col(Membership::UserId)
                    .col(Membership::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_membership_stripe_subscription_id")
                    .table(Membership::Table)
                    .col(Membership::StripeSubscriptionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Membership::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Membership {
    Table,
    Id,
    UserId,
    Tier,
    Status,
    StartedAt,
    ExpiresAt,
    StripeSessionId,
    StripeSubscriptionId,
    CreatedAt,
}
