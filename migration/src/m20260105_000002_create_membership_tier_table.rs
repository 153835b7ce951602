use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MembershipTier::Table)
                    .if_not_exists()
                    .col(string_len(MembershipTier::Level, 16).primary_key())
                    .col(string(MembershipTier::Name))
                    .col(text_null(MembershipTier::Description))
                    .col(big_integer(MembershipTier::MonthlyPriceCents).default(0))
                    .col(string_null(MembershipTier::StripePriceId))
                    .col(string_null(MembershipTier::DiscordRoleId))
                    .to_owned(),
            )
            .await?;

        // Every deployment starts with the three levels; admins fill in prices and ids.
        manager
            .get_connection()
            .execute_unprepared(
                "INSERT INTO membership_tier (level, name, monthly_price_cents) VALUES \
                 ('free', 'Free', 0), ('pro', 'Pro', 1500), ('pro_plus', 'Pro+', 4900)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MembershipTier::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MembershipTier {
    Table,
    Level,
    Name,
    Description,
    MonthlyPriceCents,
    StripePriceId,
    DiscordRoleId,
}
