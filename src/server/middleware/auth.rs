//! Access control for request handlers.
//!
//! `AuthGuard` resolves the session user and checks the requested permissions. Tier
//! checks use the user's effective tier: the tier of their active, unexpired membership,
//! or free when they have none. Admins pass every tier check.

use entity::sea_orm_active_enums::TierLevel;
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{membership::MembershipRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::{User, Viewer},
};

pub enum Permission {
    /// Any authenticated user.
    LoggedIn,
    Admin,
    /// Effective tier must be at least the given level.
    Tier(TierLevel),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Requires an authenticated user holding every listed permission.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user
    /// - `Err(AuthError::UserNotInSession)` - Not logged in (401)
    /// - `Err(AuthError::UserNotInDatabase)` - Session refers to a deleted user (401)
    /// - `Err(AuthError::AccessDenied)` - Admin required (403)
    /// - `Err(AuthError::InsufficientTier)` - Tier too low (403)
    pub async fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<User, AppError> {
        let Some(user) = self.current_user().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        for permission in permissions {
            match permission {
                Permission::LoggedIn => {}
                Permission::Admin => {
                    if !user.admin {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted an admin action without admin permissions"
                                .to_string(),
                        )
                        .into());
                    }
                }
                Permission::Tier(required) => {
                    let actual = self.effective_tier(&user).await?;
                    if actual < *required {
                        return Err(AuthError::InsufficientTier {
                            user_id: user.id,
                            required: *required,
                            actual,
                        }
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Resolves the requester for endpoints that also serve anonymous visitors.
    ///
    /// Anonymous visitors get the free tier.
    pub async fn viewer(&self) -> Result<Viewer, AppError> {
        match self.current_user().await? {
            Some(user) => {
                let tier = self.effective_tier(&user).await?;
                Ok(Viewer {
                    user_id: Some(user.id),
                    admin: user.admin,
                    tier,
                })
            }
            None => Ok(Viewer::anonymous()),
        }
    }

    async fn current_user(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        match UserRepository::new(self.db).find_by_id(user_id).await? {
            Some(user) => Ok(Some(user)),
            None => Err(AuthError::UserNotInDatabase(user_id).into()),
        }
    }

    async fn effective_tier(&self, user: &User) -> Result<TierLevel, AppError> {
        if user.admin {
            return Ok(TierLevel::ProPlus);
        }

        let tier = MembershipRepository::new(self.db)
            .effective_tier(user.id, chrono::Utc::now())
            .await?;
        Ok(tier)
    }
}
