//! Questionnaire and response repository.
//!
//! Questions and answers are stored as JSON; rows that fail to decode surface as
//! `DbErr::Json`.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::questionnaire::{
    Questionnaire, QuestionnaireParams, QuestionnaireResponse,
};

pub struct QuestionnaireRepository<'a> {
    db: &'a DatabaseConnection,
}

fn to_domain(entity: entity::questionnaire::Model) -> Result<Questionnaire, DbErr> {
    Questionnaire::from_entity(entity).map_err(|e| DbErr::Json(e.to_string()))
}

fn questions_json(params: &QuestionnaireParams) -> Result<serde_json::Value, DbErr> {
    serde_json::to_value(&params.questions).map_err(|e| DbErr::Json(e.to_string()))
}

impl<'a> QuestionnaireRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: QuestionnaireParams) -> Result<Questionnaire, DbErr> {
        let entity = entity::questionnaire::ActiveModel {
            questions: ActiveValue::Set(questions_json(&params)?),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            active: ActiveValue::Set(params.active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        to_domain(entity)
    }

    pub async fn update(
        &self,
        id: i32,
        params: QuestionnaireParams,
    ) -> Result<Option<Questionnaire>, DbErr> {
        let Some(entity) = entity::prelude::Questionnaire::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::questionnaire::ActiveModel = entity.into();
        active.questions = ActiveValue::Set(questions_json(&params)?);
        active.title = ActiveValue::Set(params.title);
        active.description = ActiveValue::Set(params.description);
        active.active = ActiveValue::Set(params.active);
        let entity = active.update(self.db).await?;

        Ok(Some(to_domain(entity)?))
    }

    /// Deletes a questionnaire and its responses.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::QuestionnaireResponse::delete_many()
            .filter(entity::questionnaire_response::Column::QuestionnaireId.eq(id))
            .exec(self.db)
            .await?;
        let result = entity::prelude::Questionnaire::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Questionnaire>, DbErr> {
        let entity = entity::prelude::Questionnaire::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(to_domain).transpose()
    }

    pub async fn get_all(&self) -> Result<Vec<Questionnaire>, DbErr> {
        entity::prelude::Questionnaire::find()
            .order_by_desc(entity::questionnaire::Column::CreatedAt)
            .order_by_desc(entity::questionnaire::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    pub async fn create_response(
        &self,
        questionnaire_id: i32,
        user_id: i32,
        answers: HashMap<String, String>,
    ) -> Result<QuestionnaireResponse, DbErr> {
        let entity = entity::questionnaire_response::ActiveModel {
            questionnaire_id: ActiveValue::Set(questionnaire_id),
            user_id: ActiveValue::Set(user_id),
            answers: ActiveValue::Set(serde_json::json!(answers)),
            submitted_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        QuestionnaireResponse::from_entity(entity).map_err(|e| DbErr::Json(e.to_string()))
    }

    /// Responses to a questionnaire, newest first.
    pub async fn get_responses(
        &self,
        questionnaire_id: i32,
    ) -> Result<Vec<QuestionnaireResponse>, DbErr> {
        entity::prelude::QuestionnaireResponse::find()
            .filter(entity::questionnaire_response::Column::QuestionnaireId.eq(questionnaire_id))
            .order_by_desc(entity::questionnaire_response::Column::SubmittedAt)
            .order_by_desc(entity::questionnaire_response::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(|entity| {
                QuestionnaireResponse::from_entity(entity).map_err(|e| DbErr::Json(e.to_string()))
            })
            .collect()
    }
}
