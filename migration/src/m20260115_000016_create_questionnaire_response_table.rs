use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User,
    m20260115_000015_create_questionnaire_table::Questionnaire,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuestionnaireResponse::Table)
                    .if_not_exists()
                    .col(pk_auto(QuestionnaireResponse::Id))
                    .col(integer(QuestionnaireResponse::QuestionnaireId))
                    .col(integer(QuestionnaireResponse::UserId))
                    .col(json(QuestionnaireResponse::Answers))
                    .col(
                        timestamp_with_time_zone(QuestionnaireResponse::SubmittedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questionnaire_response_questionnaire_id")
                            .from(
                                QuestionnaireResponse::Table,
                                QuestionnaireResponse::QuestionnaireId,
                            )
                            .to(Questionnaire::Table, Questionnaire::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questionnaire_response_user_id")
                            .from(QuestionnaireResponse::Table, QuestionnaireResponse::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuestionnaireResponse::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum QuestionnaireResponse {
    Table,
    Id,
    QuestionnaireId,
    UserId,
    Answers,
    SubmittedAt,
}
