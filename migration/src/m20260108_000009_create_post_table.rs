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
                    .table(Post::Table)
                    .if_not_exists()
                    .col(pk_auto(Post::Id))
                    .col(string_len(Post::Kind, 16))
                    .col(string(Post::Title))
                    .col(string_uniq(Post::Slug))
                    .col(text(Post::BodyMarkdown))
                    .col(string_null(Post::Excerpt))
                    .col(string_len(Post::MinTier, 16))
                    .col(string_len(Post::Status, 16))
                    .col(integer_null(Post::AuthorId))
                    .col(timestamp_with_time_zone_null(Post::PublishedAt))
                    .col(
                        timestamp_with_time_zone(Post::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Post::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_author_id")
                            .from(Post::Table, Post::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    Kind,
    Title,
    Slug,
    BodyMarkdown,
    Excerpt,
    MinTier,
    Status,
    AuthorId,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
