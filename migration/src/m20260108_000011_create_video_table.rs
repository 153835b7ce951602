use sea_orm_migration::{prelude::*, schema::*};

use super::m20260108_000010_create_channel_table::Channel;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Video::Table)
                    .if_not_exists()
                    .col(pk_auto(Video::Id))
                    .col(integer(Video::ChannelId))
                    .col(string(Video::Title))
                    .col(string(Video::Url))
                    .col(text_null(Video::Description))
                    .col(string_len(Video::Status, 16))
                    .col(timestamp_with_time_zone_null(Video::PublishedAt))
                    .col(
                        timestamp_with_time_zone(Video::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_channel_id")
                            .from(Video::Table, Video::ChannelId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Video::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Video {
    Table,
    Id,
    ChannelId,
    Title,
    Url,
    Description,
    Status,
    PublishedAt,
    CreatedAt,
}
