//! Coupon repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::coupon::{Coupon, CouponParams};

pub struct CouponRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CouponRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CouponParams) -> Result<Coupon, DbErr> {
        let entity = entity::coupon::ActiveModel {
            code: ActiveValue::Set(params.code),
            percent_off: ActiveValue::Set(params.percent_off),
            amount_off_cents: ActiveValue::Set(params.amount_off_cents),
            max_redemptions: ActiveValue::Set(params.max_redemptions),
            redemption_count: ActiveValue::Set(0),
            expires_at: ActiveValue::Set(params.expires_at),
            event_id: ActiveValue::Set(params.event_id),
            active: ActiveValue::Set(params.active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Coupon::from_entity(entity))
    }

    /// Replaces a coupon's rules, keeping its redemption count.
    pub async fn update(&self, id: i32, params: CouponParams) -> Result<Option<Coupon>, DbErr> {
        let Some(entity) = entity::prelude::Coupon::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::coupon::ActiveModel = entity.into();
        active.code = ActiveValue::Set(params.code);
        active.percent_off = ActiveValue::Set(params.percent_off);
        active.amount_off_cents = ActiveValue::Set(params.amount_off_cents);
        active.max_redemptions = ActiveValue::Set(params.max_redemptions);
        active.expires_at = ActiveValue::Set(params.expires_at);
        active.event_id = ActiveValue::Set(params.event_id);
        active.active = ActiveValue::Set(params.active);
        let entity = active.update(self.db).await?;

        Ok(Some(Coupon::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Coupon::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Coupon>, DbErr> {
        let entity = entity::prelude::Coupon::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Coupon::from_entity))
    }

    /// Finds a coupon by its normalized (upper-case) code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, DbErr> {
        let entity = entity::prelude::Coupon::find()
            .filter(entity::coupon::Column::Code.eq(code))
            .one(self.db)
            .await?;

        Ok(entity.map(Coupon::from_entity))
    }

    pub async fn code_taken(&self, code: &str, except_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Coupon::find().filter(entity::coupon::Column::Code.eq(code));
        if let Some(id) = except_id {
            query = query.filter(entity::coupon::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets every coupon, newest first.
    pub async fn get_all(&self) -> Result<Vec<Coupon>, DbErr> {
        let coupons = entity::prelude::Coupon::find()
            .order_by_desc(entity::coupon::Column::CreatedAt)
            .order_by_desc(entity::coupon::Column::Id)
            .all(self.db)
            .await?;

        Ok(coupons.into_iter().map(Coupon::from_entity).collect())
    }

    /// Adds one to a coupon's redemption count.
    ///
    /// # Returns
    /// - `Ok(Some(Coupon))` - Coupon with the new count
    /// - `Ok(None)` - Coupon was deleted meanwhile
    pub async fn increment_redemption(&self, id: i32) -> Result<Option<Coupon>, DbErr> {
        let Some(entity) = entity::prelude::Coupon::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let count = entity.redemption_count;
        let mut active: entity::coupon::ActiveModel = entity.into();
        active.redemption_count = ActiveValue::Set(count + 1);
        let entity = active.update(self.db).await?;

        Ok(Some(Coupon::from_entity(entity)))
    }
}
