//! Personalized program and checklist item repository.
//!
//! A program and its checklist are written together in one transaction, so a failed
//! regeneration leaves the previous checklist in place.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::personalized_program::{
    ChecklistItem, PersonalizedProgram, PersonalizedProgramParams, PlannedItem,
};

pub struct PersonalizedProgramRepository<'a> {
    db: &'a DatabaseConnection,
}

fn to_domain(entity: entity::personalized_program::Model) -> Result<PersonalizedProgram, DbErr> {
    PersonalizedProgram::from_entity(entity).map_err(|e| DbErr::Json(e.to_string()))
}

impl<'a> PersonalizedProgramRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a program together with its checklist.
    pub async fn create(
        &self,
        params: PersonalizedProgramParams,
        planned: Vec<PlannedItem>,
    ) -> Result<PersonalizedProgram, DbErr> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let entity = entity::personalized_program::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            title: ActiveValue::Set(params.title),
            notes: ActiveValue::Set(params.notes),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            training_days: ActiveValue::Set(params.training_days.mask()),
            daily_tasks: ActiveValue::Set(serde_json::json!(params.daily_tasks)),
            status: ActiveValue::Set(params.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        write_items(&txn, entity.id, planned).await?;

        txn.commit().await?;

        to_domain(entity)
    }

    /// Updates a program, replacing its checklist in the same transaction when `planned`
    /// is given.
    ///
    /// Planned items matching a previous item by date and title inherit its completion time.
    pub async fn update(
        &self,
        id: i32,
        params: PersonalizedProgramParams,
        planned: Option<Vec<PlannedItem>>,
    ) -> Result<Option<PersonalizedProgram>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(entity) = entity::prelude::PersonalizedProgram::find_by_id(id)
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::personalized_program::ActiveModel = entity.into();
        active.user_id = ActiveValue::Set(params.user_id);
        active.title = ActiveValue::Set(params.title);
        active.notes = ActiveValue::Set(params.notes);
        active.start_date = ActiveValue::Set(params.start_date);
        active.end_date = ActiveValue::Set(params.end_date);
        active.training_days = ActiveValue::Set(params.training_days.mask());
        active.daily_tasks = ActiveValue::Set(serde_json::json!(params.daily_tasks));
        active.status = ActiveValue::Set(params.status);
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(&txn).await?;
        if let Some(planned) = planned {
            write_items(&txn, id, planned).await?;
        }

        txn.commit().await?;

        Ok(Some(to_domain(entity)?))
    }

    /// Deletes a program and its checklist.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::ChecklistItem::delete_many()
            .filter(entity::checklist_item::Column::PersonalizedProgramId.eq(id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::PersonalizedProgram::delete_by_id(id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<PersonalizedProgram>, DbErr> {
        let entity = entity::prelude::PersonalizedProgram::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(to_domain).transpose()
    }

    /// Programs ordered by start date, optionally restricted to one user.
    pub async fn get_all(&self, user_id: Option<i32>) -> Result<Vec<PersonalizedProgram>, DbErr> {
        let mut query = entity::prelude::PersonalizedProgram::find();
        if let Some(user_id) = user_id {
            query = query.filter(entity::personalized_program::Column::UserId.eq(user_id));
        }

        query
            .order_by_desc(entity::personalized_program::Column::StartDate)
            .order_by_desc(entity::personalized_program::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    /// Checklist of a program ordered by date then position.
    pub async fn get_items(&self, program_id: i32) -> Result<Vec<ChecklistItem>, DbErr> {
        items_of(self.db, program_id).await
    }

    /// Finds a checklist item belonging to one of the user's programs.
    pub async fn find_item_for_user(
        &self,
        item_id: i32,
        user_id: i32,
    ) -> Result<Option<ChecklistItem>, DbErr> {
        let Some((item, Some(program))) = entity::prelude::ChecklistItem::find_by_id(item_id)
            .find_also_related(entity::prelude::PersonalizedProgram)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        if program.user_id != user_id {
            return Ok(None);
        }

        Ok(Some(ChecklistItem::from_entity(item)))
    }

    /// Sets or clears an item's completion time.
    pub async fn set_item_completed(
        &self,
        item_id: i32,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<ChecklistItem>, DbErr> {
        let Some(entity) = entity::prelude::ChecklistItem::find_by_id(item_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::checklist_item::ActiveModel = entity.into();
        active.completed_at = ActiveValue::Set(completed_at);
        let entity = active.update(self.db).await?;

        Ok(Some(ChecklistItem::from_entity(entity)))
    }
}

async fn items_of<C: ConnectionTrait>(
    conn: &C,
    program_id: i32,
) -> Result<Vec<ChecklistItem>, DbErr> {
    let items = entity::prelude::ChecklistItem::find()
        .filter(entity::checklist_item::Column::PersonalizedProgramId.eq(program_id))
        .order_by_asc(entity::checklist_item::Column::Date)
        .order_by_asc(entity::checklist_item::Column::Position)
        .all(conn)
        .await?;

    Ok(items.into_iter().map(ChecklistItem::from_entity).collect())
}

/// Swaps a program's checklist for `planned`, carrying over completion of items that keep
/// their date and title.
async fn write_items<C: ConnectionTrait>(
    conn: &C,
    program_id: i32,
    planned: Vec<PlannedItem>,
) -> Result<(), DbErr> {
    let completed: HashMap<(NaiveDate, String), DateTime<Utc>> = items_of(conn, program_id)
        .await?
        .into_iter()
        .filter_map(|item| item.completed_at.map(|at| ((item.date, item.title), at)))
        .collect();

    entity::prelude::ChecklistItem::delete_many()
        .filter(entity::checklist_item::Column::PersonalizedProgramId.eq(program_id))
        .exec(conn)
        .await?;

    if planned.is_empty() {
        return Ok(());
    }

    let models = planned.into_iter().map(|item| {
        let completed_at = completed.get(&(item.date, item.title.clone())).copied();
        entity::checklist_item::ActiveModel {
            personalized_program_id: ActiveValue::Set(program_id),
            date: ActiveValue::Set(item.date),
            title: ActiveValue::Set(item.title),
            position: ActiveValue::Set(item.position),
            completed_at: ActiveValue::Set(completed_at),
            ..Default::default()
        }
    });
    entity::prelude::ChecklistItem::insert_many(models)
        .exec(conn)
        .await?;

    Ok(())
}
