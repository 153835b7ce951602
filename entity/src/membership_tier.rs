use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::TierLevel;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "membership_tier")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub level: TierLevel,
    pub name: String,
    pub description: Option<String>,
    pub monthly_price_cents: i64,
    pub stripe_price_id: Option<String>,
    pub discord_role_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
