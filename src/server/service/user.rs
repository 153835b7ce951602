//! User lookups and admin management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{membership::MembershipRepository, user::UserRepository},
    error::AppError,
    model::{
        membership::Membership,
        user::{PaginatedUsers, User},
        PageParams,
    },
};

pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists users alphabetically for the admin panel.
    pub async fn get_all_users(&self, page: PageParams) -> Result<PaginatedUsers, AppError> {
        Ok(UserRepository::new(self.db).get_all_paginated(page).await?)
    }

    /// Grants or revokes admin.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn set_admin(&self, user_id: i32, admin: bool) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .set_admin(user_id, admin)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("User {} admin set to {}", user.id, admin);

        Ok(user)
    }

    /// Membership history of a user, newest first.
    pub async fn get_memberships(&self, user_id: i32) -> Result<Vec<Membership>, AppError> {
        Ok(MembershipRepository::new(self.db)
            .get_for_user(user_id)
            .await?)
    }
}
